//! typicon-core: deterministic codepoints for icon fonts
//!
//! Icon fonts are built from a tree of SVG files, one directory per style
//! family:
//!
//! ```text
//! icons/SVG/
//!   brands/apple.svg
//!   brands/google.svg
//!   regular/user.svg
//! ```
//!
//! Every icon gets a codepoint in (category, file name) order starting at
//! `U+F101`. Because the order is computed from names alone, rebuilding on
//! another machine or operating system produces the same font glyph for
//! glyph, and adding an icon only moves the icons that sort after it.
//!
//! ```rust,no_run
//! use typicon_core::codepoints::assign_codepoints;
//!
//! let map = assign_codepoints("icons/SVG")?;
//! for (identifier, codepoint) in map.iter() {
//!     println!("{identifier} U+{codepoint:04X}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The font binaries and stylesheets themselves are produced by an external
//! generator; see [`generator`] for the request handed to it.
//!
//! ---
//!
//! Made by FontLab https://www.fontlab.com/

pub mod codepoints;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod output;

pub use error::TypiconError;
