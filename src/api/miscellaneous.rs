//! Endpoints that belong to no domain.

facade! {
    Miscellaneous {
        /// Server version and build information. Needs no authentication.
        fn info() -> Get "info";
    }
}
