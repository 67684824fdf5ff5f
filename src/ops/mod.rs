pub mod issue_feed;
