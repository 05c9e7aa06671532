//! Data models for detections and results

pub mod pii_entity;

pub use pii_entity::{
    entity_types, AnonymizationResult, CandidateSpan, DetectionMethod, ResolvedEntity,
};
