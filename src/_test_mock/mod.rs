pub mod journal_mock;
