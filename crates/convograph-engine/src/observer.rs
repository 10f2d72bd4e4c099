//! Observer seam
//!
//! The generator and the template policy report their side effects through an
//! explicit observer passed in by the caller, invoked synchronously at each
//! reporting point. [`TracingObserver`] is the default sink.

use convograph_model::{OdId, Uid};

use crate::scaffold::ScaffoldKind;

/// Synchronous notifications from scaffold generation and intent storage
#[cfg_attr(test, mockall::automock)]
pub trait GraphObserver: Send + Sync {
    /// A default conversation subtree was composed (not yet persisted)
    fn scaffold_built(&self, scenario_od_id: &OdId, kind: ScaffoldKind);

    /// The full scenario subtree committed
    fn subtree_persisted(&self, scenario_uid: &Uid);

    /// The selection condition committed onto the scenario
    fn condition_attached(&self, scenario_uid: &Uid);

    /// The auto-creation policy attached a template to a stored intent
    fn template_auto_created(&self, intent_uid: &Uid, template_od_id: &OdId);
}

/// Observer that forwards every notification to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GraphObserver for TracingObserver {
    fn scaffold_built(&self, scenario_od_id: &OdId, kind: ScaffoldKind) {
        tracing::info!(%scenario_od_id, ?kind, "scaffold composed");
    }

    fn subtree_persisted(&self, scenario_uid: &Uid) {
        tracing::info!(%scenario_uid, "scenario subtree persisted");
    }

    fn condition_attached(&self, scenario_uid: &Uid) {
        tracing::info!(%scenario_uid, "selection condition attached");
    }

    fn template_auto_created(&self, intent_uid: &Uid, template_od_id: &OdId) {
        tracing::info!(%intent_uid, %template_od_id, "message template auto-created");
    }
}
