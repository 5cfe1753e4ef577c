//! Wavesmith Drawing Backend
//!
//! Rasterizes a [`Signal`](wavesmith_backend_audio::Signal) into a
//! deterministic PNG: bars from a center line in the scheme's positive and
//! negative colors, an optional faded ghost of the base signal and an
//! optional envelope outline.
//!
//! # Example
//!
//! ```
//! use wavesmith_backend_audio::Signal;
//! use wavesmith_backend_texture::{render, RenderConfig, RenderRequest};
//! use wavesmith_spec::ColorScheme;
//!
//! let signal = Signal::new(vec![0.0, 0.7, 1.0, 0.7, 0.0, -0.7, -1.0, -0.7]);
//! let colors = ColorScheme::default();
//! let result = render(&RenderRequest::new(&signal, &colors), &RenderConfig::default()).unwrap();
//! assert_eq!(result.width, 8);
//! assert_eq!(&result.png_data[1..4], b"PNG");
//! ```

pub mod canvas;
pub mod color;
pub mod error;
pub mod png;
pub mod waveform;

pub use canvas::Canvas;
pub use color::Color;
pub use error::RenderError;
pub use waveform::{rasterize, render, RenderConfig, RenderRequest, RenderResult};
