/// Per-frame drawing of the ticker graphic.
pub mod pass;
