mod reconciler;
mod snapshot_loader;

pub use reconciler::{
    plan_availability, plan_move, Outcome, Reconciler, Reconciliation, WriteOp, WritePlan,
};
pub use snapshot_loader::SnapshotLoader;
