//! Abstract interfaces for tagged arrays
//!
//! Traits are pure interfaces; implementations for the primitive numeric
//! types live next to them.

pub mod element;

pub use element::NativeElement;
