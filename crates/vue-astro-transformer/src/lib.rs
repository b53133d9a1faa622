//! Vue template to Astro template transformation.
//!
//! This crate rewrites the Vue-style template of an `.astro` component into
//! Astro syntax. It handles:
//! - Splitting off the frontmatter block, which is kept byte-for-byte
//! - Detecting whether the template uses Vue syntax at all
//! - Grouping `v-if` / `v-else-if` / `v-else` siblings into ternaries
//! - Lowering `v-for`, `v-show`, `v-html`, `v-text`, `v-bind` and `v-on`
//! - A pipeline stage for build tools that run transforms in order
//!
//! # Example
//!
//! ```
//! use vue_astro_transformer::transform_source;
//!
//! let source = "---\nconst items = [1, 2];\n---\n<li v-for=\"n in items\">{{ n }}</li>\n";
//!
//! let output = transform_source(source).expect("vue syntax detected");
//! assert_eq!(
//!     output.code,
//!     "---\nconst items = [1, 2];\n---\n{items.map((n) => (<li>{n}</li>))}\n"
//! );
//! ```

mod codegen;
mod detect;
mod directives;
mod escape;
mod for_loop;
mod group;
mod preamble;
mod stage;
mod style;
mod transform;

pub use codegen::generate_fragment;
pub use detect::is_vue_template;
pub use directives::{AttrSpec, ContentInjection, ElementDirectives};
pub use escape::{escape_attr, template_literal};
pub use for_loop::ForExpression;
pub use group::{conditional_kind, group_siblings, next_unit, Branch, RenderUnit};
pub use preamble::{split_frontmatter, Frontmatter, FENCE};
pub use stage::{Pipeline, Stage, StageOrder, VueTemplateStage, VUE_TEMPLATE_STAGE_NAME};
pub use style::{merge_show_into_style, visibility_ternary, HIDDEN_STYLE};
pub use transform::{
    is_astro_id, strip_query, transform_source, transform_source_with_options,
    vue_template_astro_transform, TransformOptions, TransformOutput, ASTRO_EXTENSION,
};
