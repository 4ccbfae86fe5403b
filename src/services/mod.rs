pub mod entity_resolver;
pub use entity_resolver::EntityResolver;

pub mod ingest_service;
pub use ingest_service::{IngestError, IngestService};

pub mod ingest_service_impl;
pub use ingest_service_impl::SeaOrmIngestService;

pub mod collection_service;
pub use collection_service::{CollectionError, CollectionService};

pub mod collection_service_impl;
pub use collection_service_impl::SeaOrmCollectionService;

pub mod list_service;
pub use list_service::{
    AddToListRequest, CreateListRequest, ListError, ListService, UpdateEntryRequest,
    UpdateListRequest,
};

pub mod list_service_impl;
pub use list_service_impl::SeaOrmListService;
