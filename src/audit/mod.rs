// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule evaluation.
//!
//! [`AuditEngine::run`] wires the catalogue, resolver, matcher and
//! classifier together and hands back an [`AuditRecord`], the only thing
//! reporting ever sees.

mod aggregator;
mod chapter;
mod engine;
mod record;

pub use aggregator::Aggregator;
pub use chapter::compare_chapters;
pub use engine::{AuditEngine, EngineOptions};
pub use record::{AuditEntry, AuditRecord, ChapterGroup, Summary};
