//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    non_empty, require, AnalyticsQuery, CacheQuery, CreateStoreRequest, OwnerQuery, SetEntry,
    SetEntryRequest, SnapshotRequest, StoreIdQuery,
};
pub use responses::{
    AnalyticsResponse, CreateStoreResponse, CurrentStats, DeleteEntriesResponse, ErrorResponse,
    GetEntryResponse, HealthResponse, ListKeysResponse, SetEntryResponse, SnapshotResponse,
    StoresResponse, SuccessResponse,
};
