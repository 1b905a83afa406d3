//! Membership state machine tests
//!
//! Join/leave, the approval queue, bans, removal, role assignment, the
//! member-counter invariant, and roster listing.

use community_core::{CommunityRole, DomainError, Snowflake};
use community_service::dto::ListMembersRequest;
use community_service::ServiceError;
use integration_tests::{
    create_request, gated_request, named_request, TestHarness, ALICE, BOB, CAROL, CREATOR,
};

fn assert_domain_err<T: std::fmt::Debug>(
    result: Result<T, ServiceError>,
    expected: &DomainError,
) {
    match result {
        Err(ServiceError::Domain(e)) => assert_eq!(e.code(), expected.code()),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

/// Assert the stored counter matches a recount of approved, unbanned rows
fn assert_counter_invariant(harness: &TestHarness, id: Snowflake) {
    let stored = harness.store.community(id).unwrap();
    assert_eq!(
        stored.member_count,
        harness.store.approved_member_count(id),
        "member_count diverged from the approved member recount"
    );
    assert!(stored.member_count >= 0);
}

// ============================================================================
// Join / Leave
// ============================================================================

#[tokio::test]
async fn join_open_community_is_counted_immediately() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;

    let response = harness.memberships().join(id, ALICE).await.unwrap();

    assert!(!response.requires_approval);
    assert!(response.member.is_approved);
    assert_eq!(response.member.role, "member");
    assert_eq!(harness.store.community(id).unwrap().member_count, 2);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn join_gated_community_parks_as_pending() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;

    let response = harness.memberships().join(id, ALICE).await.unwrap();

    assert!(response.requires_approval);
    assert!(!response.member.is_approved);
    // Pending members do not count
    assert_eq!(harness.store.community(id).unwrap().member_count, 1);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn rejoin_reports_current_membership_state() {
    let harness = TestHarness::new();
    let open = harness.create_community(create_request()).await;
    let gated = harness.create_community(gated_request("Approval Club")).await;

    harness.memberships().join(open, ALICE).await.unwrap();
    let result = harness.memberships().join(open, ALICE).await;
    assert_domain_err(result, &DomainError::AlreadyMember);

    harness.memberships().join(gated, BOB).await.unwrap();
    let result = harness.memberships().join(gated, BOB).await;
    assert_domain_err(result, &DomainError::AlreadyPending);

    harness
        .memberships()
        .ban_member(open, CREATOR, ALICE)
        .await
        .unwrap();
    let result = harness.memberships().join(open, ALICE).await;
    assert_domain_err(result, &DomainError::AlreadyBanned);
}

#[tokio::test]
async fn leave_decrements_counter() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    harness.memberships().leave(id, ALICE).await.unwrap();

    assert!(harness.store.member(id, ALICE).is_none());
    assert_eq!(harness.store.community(id).unwrap().member_count, 1);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn pending_leave_does_not_touch_counter() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    harness.memberships().leave(id, ALICE).await.unwrap();

    assert_eq!(harness.store.community(id).unwrap().member_count, 1);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn banned_member_cannot_leave_to_shed_the_ban() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness
        .memberships()
        .ban_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    // Leaving would delete the row and turn the next join into a fresh,
    // auto-approved membership
    let result = harness.memberships().leave(id, ALICE).await;
    assert_domain_err(result, &DomainError::AlreadyBanned);

    // The ban record is still in place and still blocks rejoining
    assert!(harness.store.member(id, ALICE).unwrap().is_banned);
    let result = harness.memberships().join(id, ALICE).await;
    assert_domain_err(result, &DomainError::AlreadyBanned);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn creator_cannot_leave() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;

    let result = harness.memberships().leave(id, CREATOR).await;
    assert_domain_err(result, &DomainError::CreatorCannotLeave);
}

// ============================================================================
// Approval queue
// ============================================================================

#[tokio::test]
async fn approve_pending_member_counts_them() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    let response = harness
        .memberships()
        .approve_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    assert!(response.is_approved);
    assert_eq!(harness.store.community(id).unwrap().member_count, 2);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn approve_twice_is_a_conflict() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness
        .memberships()
        .approve_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    let result = harness.memberships().approve_member(id, CREATOR, ALICE).await;
    assert_domain_err(result, &DomainError::AlreadyApproved);
    // The double approval must not double-count
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn reject_removes_pending_row_without_counting() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    harness
        .memberships()
        .reject_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    assert!(harness.store.member(id, ALICE).is_none());
    assert_eq!(harness.store.community(id).unwrap().member_count, 1);

    // A rejected user may apply again
    harness.memberships().join(id, ALICE).await.unwrap();
}

#[tokio::test]
async fn reject_approved_member_is_a_conflict() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    let result = harness.memberships().reject_member(id, CREATOR, ALICE).await;
    assert_domain_err(result, &DomainError::CannotRejectApproved);
}

#[tokio::test]
async fn plain_member_cannot_moderate_queue() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness
        .memberships()
        .approve_member(id, CREATOR, ALICE)
        .await
        .unwrap();
    harness.memberships().join(id, BOB).await.unwrap();

    let result = harness.memberships().approve_member(id, ALICE, BOB).await;
    assert_domain_err(result, &DomainError::ModeratorRequired);
}

// ============================================================================
// Ban / Unban
// ============================================================================

#[tokio::test]
async fn ban_keeps_row_and_releases_counter_slot() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    let response = harness
        .memberships()
        .ban_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    assert!(response.is_banned);
    assert!(response.banned_at.is_some());
    assert!(harness.store.member(id, ALICE).is_some());
    assert_eq!(harness.store.community(id).unwrap().member_count, 1);
    assert_counter_invariant(&harness, id);

    let result = harness.memberships().ban_member(id, CREATOR, ALICE).await;
    assert_domain_err(result, &DomainError::AlreadyBanned);
}

#[tokio::test]
async fn ban_pending_member_does_not_touch_counter() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    harness
        .memberships()
        .ban_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    assert_eq!(harness.store.community(id).unwrap().member_count, 1);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn unban_restores_counted_status_and_bookkeeping() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness
        .memberships()
        .ban_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    let response = harness
        .memberships()
        .unban_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    assert!(!response.is_banned);
    assert!(response.banned_at.is_none());
    assert_eq!(harness.store.community(id).unwrap().member_count, 2);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn unban_requires_a_banned_target() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    let result = harness.memberships().unban_member(id, CREATOR, ALICE).await;
    assert_domain_err(result, &DomainError::NotBanned);
}

#[tokio::test]
async fn moderator_cannot_ban_peer_moderator() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness.memberships().join(id, BOB).await.unwrap();
    harness
        .memberships()
        .change_role(id, CREATOR, ALICE, CommunityRole::Moderator)
        .await
        .unwrap();
    harness
        .memberships()
        .change_role(id, CREATOR, BOB, CommunityRole::Moderator)
        .await
        .unwrap();

    let result = harness.memberships().ban_member(id, ALICE, BOB).await;
    assert_domain_err(result, &DomainError::TargetOutranksActor);
}

#[tokio::test]
async fn admin_can_ban_moderator() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness.memberships().join(id, BOB).await.unwrap();
    harness
        .memberships()
        .change_role(id, CREATOR, ALICE, CommunityRole::Admin)
        .await
        .unwrap();
    harness
        .memberships()
        .change_role(id, CREATOR, BOB, CommunityRole::Moderator)
        .await
        .unwrap();

    harness.memberships().ban_member(id, ALICE, BOB).await.unwrap();
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn banned_moderator_loses_moderation_rights() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness.memberships().join(id, BOB).await.unwrap();
    harness
        .memberships()
        .change_role(id, CREATOR, ALICE, CommunityRole::Moderator)
        .await
        .unwrap();
    harness
        .memberships()
        .ban_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    let result = harness.memberships().ban_member(id, ALICE, BOB).await;
    assert_domain_err(result, &DomainError::ActorBanned);
}

// ============================================================================
// Creator immunity
// ============================================================================

#[tokio::test]
async fn creator_row_is_immune_to_moderation() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness
        .memberships()
        .change_role(id, CREATOR, ALICE, CommunityRole::Admin)
        .await
        .unwrap();

    let result = harness.memberships().ban_member(id, ALICE, CREATOR).await;
    assert_domain_err(result, &DomainError::CreatorImmune);

    let result = harness.memberships().remove_member(id, ALICE, CREATOR).await;
    assert_domain_err(result, &DomainError::CreatorImmune);
}

// ============================================================================
// Removal and roles
// ============================================================================

#[tokio::test]
async fn remove_member_decrements_counter() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    harness
        .memberships()
        .remove_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    assert!(harness.store.member(id, ALICE).is_none());
    assert_eq!(harness.store.community(id).unwrap().member_count, 1);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn remove_banned_member_does_not_double_decrement() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness
        .memberships()
        .ban_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    harness
        .memberships()
        .remove_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    assert_eq!(harness.store.community(id).unwrap().member_count, 1);
    assert_counter_invariant(&harness, id);
}

#[tokio::test]
async fn change_role_is_creator_only() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness.memberships().join(id, BOB).await.unwrap();
    harness
        .memberships()
        .change_role(id, CREATOR, ALICE, CommunityRole::Admin)
        .await
        .unwrap();

    // Even an Admin cannot assign roles
    let result = harness
        .memberships()
        .change_role(id, ALICE, BOB, CommunityRole::Moderator)
        .await;
    assert_domain_err(result, &DomainError::CreatorOnly);
}

#[tokio::test]
async fn change_role_updates_row() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    let response = harness
        .memberships()
        .change_role(id, CREATOR, ALICE, CommunityRole::Moderator)
        .await
        .unwrap();

    assert_eq!(response.role, "moderator");
    assert_eq!(
        harness.store.member(id, ALICE).unwrap().role,
        CommunityRole::Moderator
    );
    // Role changes never move the counter
    assert_counter_invariant(&harness, id);
}

// ============================================================================
// Counter invariant under operation sequences
// ============================================================================

#[tokio::test]
async fn counter_survives_mixed_operation_sequence() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;
    let memberships = harness.memberships();

    memberships.join(id, ALICE).await.unwrap();
    memberships.join(id, BOB).await.unwrap();
    memberships.join(id, CAROL).await.unwrap();
    memberships.approve_member(id, CREATOR, ALICE).await.unwrap();
    memberships.approve_member(id, CREATOR, BOB).await.unwrap();
    memberships.reject_member(id, CREATOR, CAROL).await.unwrap();
    memberships.ban_member(id, CREATOR, ALICE).await.unwrap();
    memberships.unban_member(id, CREATOR, ALICE).await.unwrap();
    memberships.ban_member(id, CREATOR, BOB).await.unwrap();
    memberships.remove_member(id, CREATOR, BOB).await.unwrap();
    memberships.leave(id, ALICE).await.unwrap();

    // Only the creator remains counted
    assert_eq!(harness.store.community(id).unwrap().member_count, 1);
    assert_counter_invariant(&harness, id);
}

// ============================================================================
// Roster listing
// ============================================================================

#[tokio::test]
async fn list_members_paginates_by_user_id() {
    let harness = TestHarness::new();
    let id = harness.create_community(create_request()).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness.memberships().join(id, BOB).await.unwrap();
    harness.memberships().join(id, CAROL).await.unwrap();

    let first = harness
        .memberships()
        .list_members(
            id,
            CREATOR,
            ListMembersRequest {
                limit: Some(2),
                ..ListMembersRequest::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(first.data.len(), 2);
    assert!(first.pagination.has_more);
    let cursor = first.pagination.after.clone().unwrap();

    let second = harness
        .memberships()
        .list_members(
            id,
            CREATOR,
            ListMembersRequest {
                limit: Some(2),
                after: Some(cursor.parse().unwrap()),
                ..ListMembersRequest::default()
            },
        )
        .await
        .unwrap();

    assert!(!second.pagination.has_more);
    let total = first.data.len() + second.data.len();
    assert_eq!(total, 4); // creator + three joiners
}

#[tokio::test]
async fn pending_queue_is_manager_only() {
    let harness = TestHarness::new();
    let id = harness.create_community(gated_request("Approval Club")).await;
    harness.memberships().join(id, ALICE).await.unwrap();
    harness.memberships().join(id, BOB).await.unwrap();
    harness
        .memberships()
        .approve_member(id, CREATOR, ALICE)
        .await
        .unwrap();

    let request = ListMembersRequest {
        pending_only: true,
        ..ListMembersRequest::default()
    };

    let result = harness
        .memberships()
        .list_members(id, ALICE, request.clone())
        .await;
    assert_domain_err(result, &DomainError::ModeratorRequired);

    let queue = harness
        .memberships()
        .list_members(id, CREATOR, request)
        .await
        .unwrap();
    assert_eq!(queue.data.len(), 1);
    assert_eq!(queue.data[0].user_id, BOB.to_string());
}

#[tokio::test]
async fn private_roster_hidden_from_outsiders() {
    let harness = TestHarness::new();

    let mut request = named_request("Secret Society");
    request.is_private = true;
    let id = harness.create_community(request).await;
    harness.memberships().join(id, ALICE).await.unwrap();

    // Non-members see nothing, not even that the community exists
    let result = harness
        .memberships()
        .list_members(id, BOB, ListMembersRequest::default())
        .await;
    assert_domain_err(result, &DomainError::CommunityNotFound(id));

    // Members see the roster
    let roster = harness
        .memberships()
        .list_members(id, ALICE, ListMembersRequest::default())
        .await
        .unwrap();
    assert_eq!(roster.data.len(), 2);
}
