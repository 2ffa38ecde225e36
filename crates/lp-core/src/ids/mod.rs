//! ID type wrappers for type safety.

mod id_macro;

use id_macro::string_id;

string_id! {
    /// Service plan identifier, owned by the library store.
    PlanId,
    /// Plan item identifier.
    PlanItemId,
    /// Song identifier.
    SongId,
    /// Song block (verse, chorus, bridge...) identifier.
    BlockId,
}
