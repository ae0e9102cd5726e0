use litfass_common::model::post::Post;
use litfass_common::model::user::Nickname;
use litfass_db::error::StoreError;
use litfass_db::gateway::Gateway;
use std::sync::Arc;
use tracing::debug;

/// How many posts each followed author can contribute to a feed. Authors
/// with more keep their older posts invisible to the feed, regardless of how
/// those compare to other authors' posts.
pub const AUTHOR_POST_CAP: u16 = 100;

/// Builds feeds by fanning out one capped read per followed author.
pub struct FeedAggregator<G> {
    gateway: Arc<G>,
}

impl<G: Gateway> FeedAggregator<G> {
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// The merged feed for one user, oldest first. Ordering is by creation
    /// time; the stable sort leaves ties in fetch order (author-list order,
    /// then per-author storage order). An empty following list yields an
    /// empty feed. Any per-author fetch failure aborts the whole
    /// aggregation; partial feeds are never returned.
    pub async fn recent_posts(&self, nick: &Nickname) -> Result<Vec<Post>, StoreError> {
        let following = self.gateway.list_following(nick).await?;

        let mut posts = Vec::new();
        for author in &following {
            let author_posts = self
                .gateway
                .recent_posts_by_author(author, AUTHOR_POST_CAP)
                .await?;
            posts.extend(author_posts);
        }

        debug!(%nick, authors = following.len(), posts = posts.len(), "feed aggregated");
        posts.sort_by_key(|post| post.created_at);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use crate::feed::{AUTHOR_POST_CAP, FeedAggregator};
    use crate::graph::SocialGraph;
    use crate::testutil::{MemoryGateway, post_at, user};
    use litfass_db::error::StoreError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn merges_authors_in_timestamp_order() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway.clone());
        let feed = FeedAggregator::new(gateway.clone());

        let reader = user("reader");
        let xenia = user("xenia");
        let yann = user("yann");
        graph.follow(&reader, &xenia).await.unwrap();
        graph.follow(&reader, &yann).await.unwrap();

        gateway.push_post(post_at("xenia", 1_000, "t1"));
        gateway.push_post(post_at("xenia", 2_000, "t2"));
        gateway.push_post(post_at("xenia", 3_000, "t3"));
        gateway.push_post(post_at("yann", 1_500, "t1.5"));

        let posts = feed.recent_posts(&reader.nickname).await.unwrap();
        let texts: Vec<&str> = posts.iter().map(|post| post.text.get()).collect();
        assert_eq!(texts, vec!["t1", "t1.5", "t2", "t3"]);
    }

    #[tokio::test]
    async fn equal_timestamps_keep_following_list_order() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway.clone());
        let feed = FeedAggregator::new(gateway.clone());

        let reader = user("reader");
        let alice = user("alice");
        let zoe = user("zoe");
        graph.follow(&reader, &zoe).await.unwrap();
        graph.follow(&reader, &alice).await.unwrap();

        // Same instant for both authors: the stable sort must leave them in
        // fetch order, which is the following-list order (alice before zoe),
        // regardless of the order the follows happened in.
        gateway.push_post(post_at("zoe", 1_000, "from zoe"));
        gateway.push_post(post_at("alice", 1_000, "from alice"));
        gateway.push_post(post_at("zoe", 500, "earlier"));

        let posts = feed.recent_posts(&reader.nickname).await.unwrap();
        let texts: Vec<&str> = posts.iter().map(|post| post.text.get()).collect();
        assert_eq!(texts, vec!["earlier", "from alice", "from zoe"]);
    }

    #[tokio::test]
    async fn author_contributes_at_most_the_cap() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway.clone());
        let feed = FeedAggregator::new(gateway.clone());

        let reader = user("reader");
        let prolific = user("prolific");
        graph.follow(&reader, &prolific).await.unwrap();

        for i in 0..150 {
            gateway.push_post(post_at("prolific", i, &format!("p{i}")));
        }

        let posts = feed.recent_posts(&reader.nickname).await.unwrap();
        assert_eq!(posts.len(), usize::from(AUTHOR_POST_CAP));

        // The cap keeps the most recent posts; the 50 oldest fall out.
        assert_eq!(posts.first().unwrap().text.get(), "p50");
        assert_eq!(posts.last().unwrap().text.get(), "p149");
    }

    #[tokio::test]
    async fn empty_following_list_yields_empty_feed() {
        let gateway = Arc::new(MemoryGateway::default());
        let feed = FeedAggregator::new(gateway);

        let reader = user("reader");
        let posts = feed.recent_posts(&reader.nickname).await.unwrap();
        assert_eq!(posts, vec![]);
    }

    #[tokio::test]
    async fn per_author_failure_aborts_the_whole_feed() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway.clone());
        let feed = FeedAggregator::new(gateway.clone());

        let reader = user("reader");
        let fine = user("fine");
        let broken = user("broken");
        graph.follow(&reader, &fine).await.unwrap();
        graph.follow(&reader, &broken).await.unwrap();

        gateway.push_post(post_at("fine", 1_000, "hello"));
        gateway.fail_posts_for(&broken.nickname);

        let result = feed.recent_posts(&reader.nickname).await;
        assert!(matches!(result, Err(StoreError::Timeout(_))));
    }
}
