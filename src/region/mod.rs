mod rect;
mod resolve;

pub use rect::{Rect, RectOrigin, Region, ResolvedRect};
pub use resolve::resolve;
