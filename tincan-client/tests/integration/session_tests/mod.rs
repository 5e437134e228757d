pub mod test_roster_replacement;
