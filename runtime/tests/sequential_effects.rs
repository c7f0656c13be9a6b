//! Integration tests for sequential effect execution.
//!
//! Sequential effects must complete in order even when an earlier effect is
//! slower than a later one. The storefront relies on this for flows like
//! "upload avatar, then update profile".

#![allow(clippy::unwrap_used)] // Test code

use foodcourt_core::{Effect, Reducer, SmallVec, smallvec};
use foodcourt_runtime::Store;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
struct SeqState {
    seen: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SeqAction {
    Start,
    Record(u32),
}

#[derive(Clone)]
struct SeqReducer;

impl Reducer for SeqReducer {
    type State = SeqState;
    type Action = SeqAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SeqAction::Start => smallvec![Effect::chain(vec![
                // Slow first step
                Effect::Future(Box::pin(async {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Some(SeqAction::Record(1))
                })),
                // Fast second step
                Effect::Future(Box::pin(async { Some(SeqAction::Record(2)) })),
            ])],
            SeqAction::Record(step) => {
                state.seen.push(step);
                SmallVec::new()
            },
        }
    }
}

#[tokio::test]
async fn sequential_effects_complete_in_order() {
    let store = Store::new(SeqState::default(), SeqReducer, ());

    let last = store
        .send_and_wait_for(
            SeqAction::Start,
            |a| matches!(a, SeqAction::Record(2)),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert_eq!(last, SeqAction::Record(2));
    assert_eq!(store.state(|s| s.seen.clone()).await, vec![1, 2]);
}
