//! # Revision 174
//!
//! First revision with resist bars on the status update, the expansion
//! trailer byte on login-granted, and real housing support.

use duskhold_world::{House, PlayerState};

use super::{rev168, CodecOps, SessionCodec};

/// Patches the table entries this revision changed.
pub(crate) fn apply(ops: &mut CodecOps) {
    ops.login_granted = login_granted;
    ops.status_update = status_update;
    ops.house_create = house_create;
    ops.house_enter = house_enter;
    ops.house_interior = house_interior;
}

fn login_granted(codec: &SessionCodec, player: &PlayerState, color: u8) {
    // Expansion byte: clients from this revision on refuse the shorter form.
    rev168::login_granted_body(codec, player, color, Some(1));
}

fn status_update(codec: &SessionCodec, player: &PlayerState) {
    rev168::status_update_body(codec, player, true);
}

fn house_create(codec: &SessionCodec, house: &House, tick: u64) {
    rev168::house_create_real(codec, house, tick);
}

fn house_enter(codec: &SessionCodec, house: &House) {
    rev168::house_enter_real(codec, house);
}

fn house_interior(codec: &SessionCodec, house: &House) {
    rev168::house_interior_real(codec, house);
}
