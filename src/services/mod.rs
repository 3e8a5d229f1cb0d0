pub mod account;
pub mod admin;
pub mod backend;
pub mod catalog;
pub mod session;
pub mod watchlist;

pub use account::AccountService;
pub use admin::AdminService;
pub use backend::{AdminBackend, HttpBackend, MovieBackend};
pub use catalog::CatalogService;
pub use session::SessionStore;
pub use watchlist::{WatchlistAction, WatchlistError, WatchlistStore};
