mod test_join_leave_broadcast;
mod test_leave_message_unregisters;
mod test_snapshot_and_health;
