use clap::{Args, Parser, Subcommand};
use rocketchat::{
    ClientError, ClientOptions, ConnectionConfig, HistoryOptions, HttpMethod, PageQuery, RocketChatClient,
};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing credentials; pass --username/--password or set ROCKETCHAT_USERNAME/ROCKETCHAT_PASSWORD")]
    MissingCredentials,
    #[error("{0}")]
    InvalidMethod(String),
    #[error("--params must be a JSON object")]
    ParamsNotObject,
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "rocketchat", about = "Rocket.Chat REST and realtime CLI")]
struct Cli {
    #[arg(long, env = "ROCKETCHAT_PROTOCOL")]
    protocol: Option<String>,

    #[arg(long, env = "ROCKETCHAT_HOST")]
    host: Option<String>,

    #[arg(long, env = "ROCKETCHAT_PORT")]
    port: Option<u16>,

    #[arg(long, env = "ROCKETCHAT_BASE_PATH")]
    base_path: Option<String>,

    #[arg(long, env = "ROCKETCHAT_WS_PROTOCOL")]
    ws_protocol: Option<String>,

    #[arg(long, env = "ROCKETCHAT_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "ROCKETCHAT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long, env = "ROCKETCHAT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn options(&self) -> ClientOptions {
        ClientOptions {
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            base_path: self.base_path.clone(),
            websocket_protocol: self.ws_protocol.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Server version information (no login).
    Info,
    /// Log in and print the issued token.
    Login {
        /// Also authenticate the realtime socket.
        #[arg(long, default_value_t = false)]
        realtime: bool,
    },
    Me,
    Groups(GroupsCommand),
    Channels(ChannelsCommand),
    Chat(ChatCommand),
    /// Send an arbitrary REST request, e.g. `request GET rooms.get`.
    Request {
        method: String,
        endpoint: String,
        #[arg(long, help = "JSON object of request parameters")]
        params: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
struct PageArgs {
    #[arg(long)]
    offset: Option<u64>,
    #[arg(long)]
    count: Option<u64>,
}

impl PageArgs {
    fn query(&self) -> PageQuery {
        PageQuery { offset: self.offset, count: self.count, ..PageQuery::default() }
    }
}

#[derive(Args, Debug)]
struct GroupsCommand {
    #[command(subcommand)]
    command: GroupsSubcommand,
}

#[derive(Subcommand, Debug)]
enum GroupsSubcommand {
    List(PageArgs),
    Info {
        room_id: String,
    },
    History {
        room_id: String,
        #[arg(long)]
        latest: Option<String>,
        #[arg(long)]
        oldest: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Create {
        name: String,
        #[arg(long, value_delimiter = ',')]
        members: Vec<String>,
    },
    Archive {
        room_id: String,
    },
}

#[derive(Args, Debug)]
struct ChannelsCommand {
    #[command(subcommand)]
    command: ChannelsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChannelsSubcommand {
    List(PageArgs),
    Info { room_id: String },
}

#[derive(Args, Debug)]
struct ChatCommand {
    #[command(subcommand)]
    command: ChatSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChatSubcommand {
    Post {
        #[arg(long)]
        room_id: String,
        #[arg(long)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ConnectionConfig::from_options(cli.options());

    match cli.command {
        Command::Info => {
            let client = RocketChatClient::new(config)?;
            print_json(&client.miscellaneous().info().await?)
        }
        Command::Login { realtime } => run_login(config, realtime).await,
        Command::Me => {
            let client = authenticated(config).await?;
            print_json(&client.authentication().me().await?)
        }
        Command::Groups(groups) => run_groups(&authenticated(config).await?, groups).await,
        Command::Channels(channels) => run_channels(&authenticated(config).await?, channels).await,
        Command::Chat(chat) => run_chat(&authenticated(config).await?, chat).await,
        Command::Request { method, endpoint, params } => {
            let method = method.parse::<HttpMethod>().map_err(CliError::InvalidMethod)?;
            let params = parse_params(params.as_deref())?;
            let client = authenticated(config).await?;
            print_json(&client.request(method, &endpoint, params).await?)
        }
    }
}

async fn run_login(config: ConnectionConfig, realtime: bool) -> Result<(), CliError> {
    if !config.has_credentials() {
        return Err(CliError::MissingCredentials);
    }
    let client = RocketChatClient::new(config.clone())?;
    let data = client.login(&config.username, &config.password, realtime).await?;
    if realtime {
        client.close().await?;
    }
    print_json(&serde_json::to_value(&data)?)
}

async fn run_groups(client: &RocketChatClient, groups: GroupsCommand) -> Result<(), CliError> {
    let groups_api = client.groups();
    let json = match groups.command {
        GroupsSubcommand::List(page) => groups_api.list(&page.query()).await?,
        GroupsSubcommand::Info { room_id } => groups_api.info(&room_id).await?,
        GroupsSubcommand::History { room_id, latest, oldest, page } => {
            let history = HistoryOptions { latest, oldest, ..HistoryOptions::default() };
            groups_api.history(&room_id, &history, &page.query()).await?
        }
        GroupsSubcommand::Create { name, members } => {
            let members: Vec<&str> = members.iter().map(String::as_str).collect();
            groups_api.create(&name, &members).await?
        }
        GroupsSubcommand::Archive { room_id } => groups_api.archive(&room_id).await?,
    };
    print_json(&json)
}

async fn run_channels(client: &RocketChatClient, channels: ChannelsCommand) -> Result<(), CliError> {
    let json = match channels.command {
        ChannelsSubcommand::List(page) => client.channels().list(&page.query()).await?,
        ChannelsSubcommand::Info { room_id } => client.channels().info(&room_id).await?,
    };
    print_json(&json)
}

async fn run_chat(client: &RocketChatClient, chat: ChatCommand) -> Result<(), CliError> {
    match chat.command {
        ChatSubcommand::Post { room_id, text } => {
            let message = serde_json::json!({ "roomId": room_id, "text": text });
            print_json(&client.chat().post_message(&message).await?)
        }
    }
}

/// Connect and log in with the configured credentials.
async fn authenticated(config: ConnectionConfig) -> Result<RocketChatClient, CliError> {
    if !config.has_credentials() {
        return Err(CliError::MissingCredentials);
    }
    Ok(RocketChatClient::connect(config).await?)
}

fn parse_params(raw: Option<&str>) -> Result<Map<String, Value>, CliError> {
    match raw {
        None => Ok(Map::new()),
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(CliError::ParamsNotObject),
        },
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_must_be_an_object() {
        assert!(parse_params(None).expect("none").is_empty());
        assert_eq!(parse_params(Some(r#"{"roomId":"R1"}"#)).expect("object")["roomId"], "R1");
        assert!(matches!(parse_params(Some("[1]")), Err(CliError::ParamsNotObject)));
        assert!(matches!(parse_params(Some("{")), Err(CliError::InvalidJson(_))));
    }

    #[test]
    fn page_args_forward_only_given_flags() {
        let cli = Cli::try_parse_from(["rocketchat", "groups", "list", "--count", "5"]).expect("parse");
        let Command::Groups(GroupsCommand { command: GroupsSubcommand::List(page) }) = cli.command else {
            panic!("expected groups list");
        };
        assert_eq!(page.query(), PageQuery::new().with_count(5));
    }

    #[test]
    fn global_flags_resolve_into_options() {
        let cli = Cli::try_parse_from([
            "rocketchat",
            "--host",
            "chat.example.com",
            "--port",
            "443",
            "--protocol",
            "https",
            "--ws-protocol",
            "wss",
            "info",
        ])
        .expect("parse");
        let config = ConnectionConfig::from_options(cli.options());
        assert_eq!(config.rest_base_url(), "https://chat.example.com:443/api/v1/");
        assert_eq!(config.websocket_url(), "wss://chat.example.com:443/websocket");
    }

    #[test]
    fn create_splits_member_list() {
        let cli = Cli::try_parse_from(["rocketchat", "groups", "create", "ops", "--members", "alice,bob"])
            .expect("parse");
        let Command::Groups(GroupsCommand { command: GroupsSubcommand::Create { name, members } }) = cli.command
        else {
            panic!("expected groups create");
        };
        assert_eq!(name, "ops");
        assert_eq!(members, ["alice", "bob"]);
    }
}
