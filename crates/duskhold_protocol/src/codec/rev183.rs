//! # Revision 183
//!
//! Adds the durability/condition trailer pair to every item record and the
//! level byte to quest records. Everything else rides revision 174.

use duskhold_world::{Item, QuestEntry, TradeWindow};

use super::{rev168, CodecOps, SessionCodec};
use crate::project::ItemWire;

/// Patches the table entries this revision changed.
pub(crate) fn apply(ops: &mut CodecOps) {
    ops.inventory_window = inventory_window;
    ops.inventory_update = inventory_update;
    ops.trade_window = trade_window;
    ops.quest_entry = quest_entry;
    ops.quest_list = quest_list;
}

fn inventory_window(codec: &SessionCodec, items: &[Item]) {
    rev168::inventory_window_with(codec, items, &ItemWire::INVENTORY_V183);
}

fn inventory_update(codec: &SessionCodec, items: &[Item]) {
    rev168::inventory_update_with(codec, items, &ItemWire::INVENTORY_V183);
}

fn trade_window(codec: &SessionCodec, window: &TradeWindow) {
    rev168::trade_window_with(codec, window, &ItemWire::TRADE_V183);
}

fn quest_entry(codec: &SessionCodec, quest: &QuestEntry) {
    rev168::quest_entry_with(codec, quest, true);
}

fn quest_list(codec: &SessionCodec, quests: &[QuestEntry]) {
    rev168::quest_list_with(codec, quests, true);
}
