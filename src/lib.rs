pub mod anim;
pub mod colors;
pub mod delay;
pub mod error;
pub mod layout;
pub mod svg;
pub mod text;
pub mod timing;
mod helpers;

pub use anim::AnimationConfig;
pub use colors::{gradient_index, keyframe_offsets, keyframe_rules, DEFAULT_FILL};
pub use delay::{animation_delay, BlockGeometry, CascadeDirection, GlyphPosition};
pub use error::{Error, Result};
pub use layout::LayoutConfig;
pub use svg::Renderer;
pub use text::TextBlock;
pub use timing::TimingFunction;
