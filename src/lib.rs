//! Decoder for OpenPOWER Platform Event Log (PEL) records, commonly called
//! eSEL.
//!
//! This crate is the decoding *engine* only: a binary section framer, a
//! typed-section data model, a component-indexed plugin registry that hands
//! component-specific User-Defined-Data and Primary-Reference-Code payloads
//! off to pluggable decoders, and a parameter-collector interface a decoder
//! uses to emit named/typed fields without knowing how they'll be rendered.
//!
//! Reading blobs off disk or a BMC event store, rendering the decoded
//! `Params` as text/JSON/hex, and the specific content decoders for
//! firmware trace blobs or hostboot backtraces are all out of scope here —
//! they're external collaborators that plug into the registry in
//! [`plugins`].
#![warn(missing_docs)]

pub mod collector;
pub mod config;
pub mod error;
mod event;
mod hexdump;
mod io;
pub mod param;
pub mod plugins;
mod sel_record;
pub mod section;
pub mod tables;

pub use collector::{ParamCollector, ParamsCollector};
pub use error::FormatError;
pub use event::Event;
pub use param::{Numeric, Param, Params};
pub use sel_record::SelRecord;
pub use section::{Header, PhData, PsData, Section, SectionKind, UhData};
