//! Type definitions

mod container;

pub use container::{position_in, Container, CursorMove, LoadState, DEFAULT_VISIBLE};

// Re-export the client's wire types
pub use contented_client::{
    page_count, Content, ContainerSearch, ContainerSummary, ContentSearch, PaginatedResponse,
    PaginationParams, Screen, Tag, TagQuery, VideoCodecInfo, DEFAULT_PAGE_SIZE,
};
