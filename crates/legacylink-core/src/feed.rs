//! Posts, comments, likes and the per-viewer feed projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::principal::Owner;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  pub id:          i64,
  pub owner:       Owner,
  pub author_name: String,
  /// Zero for admin authors.
  pub batch_year:  i32,
  pub title:       String,
  pub content:     String,
  pub created_at:  DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
  pub owner:       Owner,
  pub author_name: String,
  pub batch_year:  i32,
  pub title:       String,
  pub content:     String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id:          i64,
  pub post_id:     i64,
  pub owner:       Owner,
  pub author_name: String,
  pub comment:     String,
  pub created_at:  DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
  pub post_id:     i64,
  pub owner:       Owner,
  pub author_name: String,
  pub comment:     String,
}

/// A post as seen by one viewer. Counts and the `liked` flag are computed at
/// read time and never cached across viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPost {
  #[serde(flatten)]
  pub post:          Post,
  pub like_count:    u64,
  pub comment_count: u64,
  pub liked:         bool,
  /// Oldest first.
  pub comments:      Vec<Comment>,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
  pub user_liked: bool,
  pub like_count: u64,
}

/// Admin dashboard summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
  pub student_count: u64,
  pub alumni_count:  u64,
  pub post_count:    u64,
  /// Newest first.
  pub recent_posts:  Vec<Post>,
}
