use uuid::Uuid;

use crate::layer::LayerId;

/// Generates a layer id that is never handed out twice, not even across
/// documents or after the layer it named was deleted.
pub fn generate_layer_id() -> LayerId {
    LayerId::new(format!("layer-{}", Uuid::new_v4().simple()))
}
