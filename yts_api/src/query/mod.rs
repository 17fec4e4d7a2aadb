mod common;
pub use self::common::{PagedQuery, Query, QueryCommon, SortDirection};

mod list;
pub use self::list::{MovieListQuery, Quality, SortBy};

mod movie;
pub use self::movie::{MovieDetailsQuery, SuggestionsQuery};
