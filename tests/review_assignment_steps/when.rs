//! When steps for reviewer assignment BDD scenarios.

use super::world::{ReviewWorld, run_async};
use rota::review::services::{CreatePullRequestRequest, ReassignReviewerRequest};
use rstest_bdd_macros::when;

#[when(r#""{author}" opens pull request "{id}" named "{name}""#)]
fn author_opens_pull_request(
    world: &mut ReviewWorld,
    author: String,
    id: String,
    name: String,
) {
    let request = CreatePullRequestRequest::new(id, name, author);
    let result = run_async(world.service.create_pull_request(request));
    world.record(result);
}

#[when(r#"pull request "{id}" is merged"#)]
fn pull_request_is_merged(world: &mut ReviewWorld, id: String) {
    let result = run_async(world.service.merge_pull_request(&id));
    world.record(result);
}

#[when(r#"reviewer "{reviewer}" is reassigned on pull request "{id}""#)]
fn reviewer_is_reassigned(world: &mut ReviewWorld, reviewer: String, id: String) {
    let request = ReassignReviewerRequest::new(id, reviewer);
    match run_async(world.service.reassign_reviewer(request)) {
        Ok(reassignment) => {
            world.last_replacement = Some(reassignment.replaced_by);
            world.last_pull_request = Some(reassignment.pull_request);
        }
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#"the review queue of "{reviewer}" is requested"#)]
fn review_queue_is_requested(world: &mut ReviewWorld, reviewer: String) {
    match run_async(world.service.review_queue(&reviewer)) {
        Ok(queue) => world.last_queue = Some(queue),
        Err(err) => world.last_error = Some(err),
    }
}
