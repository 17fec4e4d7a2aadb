mod meta;
pub use self::meta::Response;

mod movie;
pub use self::movie::{ListingItem, MovieId, MovieList};
