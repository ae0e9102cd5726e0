use litfass_common::model::user::{Nickname, User, UserCard};
use litfass_db::error::StoreError;
use litfass_db::gateway::Gateway;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Outcome of the paired-edge lookup. Deliberately not a boolean: the third
/// possibility, a half-written pair, is an error and never a status.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum FollowStatus {
    Following,
    NotFollowing,
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Follow state between {actor} and {target} is inconsistent: exactly one edge row exists")]
    Inconsistent { actor: Nickname, target: Nickname },
}

/// Follow/unfollow over the two denormalized relation tables.
pub struct SocialGraph<G> {
    gateway: Arc<G>,
}

impl<G: Gateway> SocialGraph<G> {
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Writes both replicas of the actor -> target relationship, each with
    /// the other side's current profile snapshot. The two writes are
    /// independent; a failure between them leaves a pair that
    /// [`Self::is_following`] reports as inconsistent. Re-following simply
    /// overwrites both rows.
    pub async fn follow(&self, actor: &User, target: &User) -> Result<(), StoreError> {
        debug!(actor = %actor.nickname, target = %target.nickname, "follow");
        self.gateway
            .insert_follower_edge(&target.nickname, &actor.card())
            .await?;
        self.gateway
            .insert_following_edge(&actor.nickname, &target.card())
            .await?;

        Ok(())
    }

    /// Deletes both replicas. Deleting edges that never existed is not an
    /// error.
    pub async fn unfollow(&self, actor: &Nickname, target: &Nickname) -> Result<(), StoreError> {
        debug!(%actor, %target, "unfollow");
        self.gateway.delete_follower_edge(target, actor).await?;
        self.gateway.delete_following_edge(actor, target).await?;

        Ok(())
    }

    /// Reads both replicas independently. Both present means following, both
    /// absent means not; anything else is surfaced as
    /// [`GraphError::Inconsistent`] rather than silently picking a side.
    pub async fn is_following(
        &self,
        actor: &Nickname,
        target: &Nickname,
    ) -> Result<FollowStatus, GraphError> {
        let follower_edge = self.gateway.fetch_follower_edge(target, actor).await?;
        let following_edge = self.gateway.fetch_following_edge(actor, target).await?;

        match (follower_edge, following_edge) {
            (Some(_), Some(_)) => Ok(FollowStatus::Following),
            (None, None) => Ok(FollowStatus::NotFollowing),
            _ => Err(GraphError::Inconsistent {
                actor: actor.clone(),
                target: target.clone(),
            }),
        }
    }

    pub async fn followers(&self, nick: &Nickname) -> Result<Vec<UserCard>, StoreError> {
        self.gateway.list_followers(nick).await
    }

    pub async fn following(&self, nick: &Nickname) -> Result<Vec<Nickname>, StoreError> {
        self.gateway.list_following(nick).await
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{FollowStatus, GraphError, SocialGraph};
    use crate::testutil::{MemoryGateway, nickname, user};
    use litfass_db::gateway::Gateway;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn follow_is_visible_from_both_sides() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway.clone());

        let ada = user("ada");
        let bob = user("bob");
        graph.follow(&ada, &bob).await.unwrap();

        assert_eq!(
            graph
                .is_following(&ada.nickname, &bob.nickname)
                .await
                .unwrap(),
            FollowStatus::Following
        );

        let followers_of_bob = graph.followers(&bob.nickname).await.unwrap();
        assert_eq!(followers_of_bob, vec![ada.card()]);

        let ada_follows = graph.following(&ada.nickname).await.unwrap();
        assert_eq!(ada_follows, vec![bob.nickname.clone()]);
    }

    #[tokio::test]
    async fn unfollow_removes_both_edges() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway.clone());

        let ada = user("ada");
        let bob = user("bob");
        graph.follow(&ada, &bob).await.unwrap();
        graph.unfollow(&ada.nickname, &bob.nickname).await.unwrap();

        assert_eq!(
            graph
                .is_following(&ada.nickname, &bob.nickname)
                .await
                .unwrap(),
            FollowStatus::NotFollowing
        );
        assert!(
            gateway
                .fetch_follower_edge(&bob.nickname, &ada.nickname)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            gateway
                .fetch_following_edge(&ada.nickname, &bob.nickname)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn unfollow_without_follow_is_not_an_error() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway);

        graph
            .unfollow(&nickname("ada"), &nickname("bob"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn refollow_overwrites_in_place() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway);

        let ada = user("ada");
        let bob = user("bob");
        graph.follow(&ada, &bob).await.unwrap();
        graph.follow(&ada, &bob).await.unwrap();

        assert_eq!(graph.followers(&bob.nickname).await.unwrap().len(), 1);
        assert_eq!(graph.following(&ada.nickname).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn half_written_pair_is_inconsistent() {
        let gateway = Arc::new(MemoryGateway::default());
        let graph = SocialGraph::new(gateway.clone());

        let ada = user("ada");
        let bob = user("bob");

        // Simulate a partial write: only the followers replica lands.
        gateway
            .insert_follower_edge(&bob.nickname, &ada.card())
            .await
            .unwrap();

        let result = graph.is_following(&ada.nickname, &bob.nickname).await;
        assert_eq!(
            result,
            Err(GraphError::Inconsistent {
                actor: ada.nickname.clone(),
                target: bob.nickname.clone(),
            })
        );

        // The other half missing must be reported the same way.
        gateway
            .delete_follower_edge(&bob.nickname, &ada.nickname)
            .await
            .unwrap();
        gateway
            .insert_following_edge(&ada.nickname, &bob.card())
            .await
            .unwrap();

        assert!(matches!(
            graph.is_following(&ada.nickname, &bob.nickname).await,
            Err(GraphError::Inconsistent { .. })
        ));
    }
}
