use std::sync::Arc;

use metadata::MetadataProvider;

use crate::projects::Projects;
use crate::tasks::Tasks;

pub struct PlatformProvider {
    pub projects: Arc<Projects>,
    pub tasks: Arc<Tasks>,
}

impl PlatformProvider {
    pub fn new(md: Arc<MetadataProvider>) -> Self {
        Self {
            projects: Arc::new(Projects::new(md.projects.clone(), md.tasks.clone())),
            tasks: Arc::new(Tasks::new(md.tasks.clone())),
        }
    }
}
