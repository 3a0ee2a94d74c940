pub mod collection;
pub mod events;
pub mod handle;
pub mod memory;
pub mod page_size;
pub mod paginator;

pub use collection::PageableCollection;
pub use events::{EventHub, Subscription};
pub use handle::{HandleKind, HandleOptions, HandleTitle, PageHandle};
pub use memory::InMemoryCollection;
pub use page_size::{PageSizeChoice, PageSizeControl, PageSizeSelector, PageSizeView};
pub use paginator::{Paginator, PaginatorBuilder, RenderedPaginator, Summary, SummaryEntry};
