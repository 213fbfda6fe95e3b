mod model_version;
mod records;

pub(crate) use model_version::{CURRENT_MODEL_VERSION, ModelVersion};
pub(crate) use records::{RECORD_UID, RecordModel};
