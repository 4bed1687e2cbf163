#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # datum-types
//!
//! Concrete datum records built on the `datum-structure` contract.
//!
//! Every record embeds the timestamped [`Base`] event by composition and
//! delegates parse, validate and normalize to it before adding its own
//! fields. Records with a primary quantity and an "expected" companion check
//! them through a [`LinkedPair`].
//!
//! ```rust
//! use datum_ir::Value;
//! use datum_structure::UnparsedKeys;
//! use datum_types::DatumDecoder;
//! use datum_validation::ValidationContext;
//!
//! let decoder = DatumDecoder::new().unwrap();
//! let context = ValidationContext::new();
//! let source = Value::from_json_str(r#"{"type": "bolus", "subType": "normal", "normal": 2.5}"#).unwrap();
//!
//! let datum = decoder.decode_value(&context, &source, UnparsedKeys::Error).unwrap();
//! assert_eq!(datum.meta()["subType"], "normal");
//! ```

pub mod association;
pub mod basal;
pub mod base;
pub mod bolus;
pub mod datum;
pub mod linked;
pub mod origin;
pub mod time;

pub use association::Association;
pub use basal::{Basal, BasalBase};
pub use base::Base;
pub use bolus::{Bolus, BolusBase};
pub use datum::{Datum, DatumDecoder, TYPES};
pub use linked::{LinkedPair, Quantity, validate_expected_linkage};
pub use origin::Origin;
