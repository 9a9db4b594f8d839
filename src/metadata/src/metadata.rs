use std::path::Path;
use std::sync::Arc;

use common::DATA_FILE_PROJECTS;
use common::DATA_FILE_TASKS;

use crate::projects;
use crate::tasks;

/// Repositories shared by every request handler. Built once at startup and
/// passed around explicitly.
pub struct MetadataProvider {
    pub projects: Arc<dyn projects::Provider>,
    pub tasks: Arc<dyn tasks::Provider>,
}

impl MetadataProvider {
    pub fn new(data_path: impl AsRef<Path>, serialize_writes: bool) -> Self {
        let data_path = data_path.as_ref();
        MetadataProvider {
            projects: Arc::new(
                projects::ProviderImpl::new(data_path.join(DATA_FILE_PROJECTS))
                    .with_serialized_writes(serialize_writes),
            ),
            tasks: Arc::new(
                tasks::ProviderImpl::new(data_path.join(DATA_FILE_TASKS))
                    .with_serialized_writes(serialize_writes),
            ),
        }
    }
}
