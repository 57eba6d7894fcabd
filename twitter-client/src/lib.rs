pub mod api;

pub use api::TwitterClient;
