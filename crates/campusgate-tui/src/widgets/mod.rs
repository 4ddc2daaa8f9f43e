//! Small shared rendering helpers.

pub mod labels;
