//! Build-pipeline glue.
//!
//! A host build tool runs an ordered list of stages over each module. The
//! Vue template stage has to see `.astro` sources before the host's own
//! Astro compiler does, so it is registered as a [`StageOrder::Pre`] stage and
//! the [`Pipeline`] places it when the pipeline is assembled.

use crate::transform::{strip_query, vue_template_astro_transform, ASTRO_EXTENSION};

/// Name under which the Vue template stage registers.
pub const VUE_TEMPLATE_STAGE_NAME: &str = "vuecast-vue-template-pre-astro";

/// When a stage runs relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StageOrder {
    /// Before the host's own transforms.
    Pre,
    /// Alongside the host's transforms.
    #[default]
    Normal,
    /// After everything else.
    Post,
}

/// One transform step of a build pipeline.
pub trait Stage: Send + Sync {
    /// A unique, human-readable stage name.
    fn name(&self) -> &str;

    /// Where the stage sits in the pipeline.
    fn order(&self) -> StageOrder {
        StageOrder::Normal
    }

    /// Transforms a module. `None` leaves the code as it is.
    fn transform(&self, code: &str, id: &str) -> Option<String>;
}

/// Rewrites Vue template syntax in `.astro` modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct VueTemplateStage;

impl Stage for VueTemplateStage {
    fn name(&self) -> &str {
        VUE_TEMPLATE_STAGE_NAME
    }

    fn order(&self) -> StageOrder {
        StageOrder::Pre
    }

    fn transform(&self, code: &str, id: &str) -> Option<String> {
        let path = strip_query(id);
        if !path.ends_with(ASTRO_EXTENSION) {
            return None;
        }
        log::trace!("{VUE_TEMPLATE_STAGE_NAME}: {path}");
        vue_template_astro_transform(code, path).map(|output| output.code)
    }
}

/// An ordered list of stages.
///
/// Stages are sorted by [`StageOrder`] on insertion; stages with the same
/// order keep their registration order.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline holding only the Vue template stage.
    pub fn with_vue_templates() -> Self {
        Self::new().with_stage(VueTemplateStage)
    }

    /// Adds a stage, builder style.
    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.insert(Box::new(stage));
        self
    }

    /// Inserts a stage after every stage of the same or an earlier order.
    pub fn insert(&mut self, stage: Box<dyn Stage>) {
        let order = stage.order();
        let at = self.stages.partition_point(|s| s.order() <= order);
        self.stages.insert(at, stage);
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs every stage in order, feeding each the latest code. Returns
    /// `None` if no stage changed anything.
    pub fn run(&self, code: &str, id: &str) -> Option<String> {
        let mut current: Option<String> = None;
        for stage in &self.stages {
            let input = current.as_deref().unwrap_or(code);
            if let Some(next) = stage.transform(input, id) {
                current = Some(next);
            }
        }
        current
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.stage_names()).finish()
    }
}
