//! Convenient re-exports of commonly used types from docgate.
//!
//! ```ignore
//! use docgate::prelude::*;
//! ```

pub use docgate_core::{
    collection::Collection,
    store::{DocumentStore, DynDocumentStore},
    backend::{StoreBackend, DynStoreBackend, StoreBackendBuilder},
    query::{Query, QueryVisitor, Expr, Sort, SortDirection, FieldOp, QueryBuilder, Filter},
    params::RawParams,
    translate::translate,
    flatten::{FlatUpdate, flatten, expand},
    identifier::DocumentId,
    config::{CollectionConfig, CollectionConfigs, IdMode},
    error::{DocumentStoreError, DocumentStoreResult},
};
