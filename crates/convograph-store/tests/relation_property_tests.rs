//! Property tests over the turn-intent relation
//!
//! Whatever sequence of stores and reclassifications runs, a turn's request
//! and response sets stay disjoint and every intent sits on exactly the side
//! it was last classified on.

use convograph_model::Direction;
use convograph_store::DataClient;
use convograph_test_utils::{app_intent_with_template, seeded_store, user_intent};
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sides_stay_disjoint(moves in proptest::collection::vec((0..4usize, any::<bool>()), 1..24)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        rt.block_on(async {
            let (store, turn_uid) = seeded_store("prop").await.unwrap();

            // Four intents, two stored per side, then shuffled around by the
            // generated move sequence.
            let mut uids = Vec::new();
            let mut expected = HashMap::new();
            for (i, direction) in [
                Direction::Request,
                Direction::Request,
                Direction::Response,
                Direction::Response,
            ]
            .iter()
            .enumerate()
            {
                let stored = match direction {
                    Direction::Request => store
                        .add_request_intent(&turn_uid, user_intent(&format!("req_{i}")))
                        .await
                        .unwrap(),
                    Direction::Response => store
                        .add_response_intent(
                            &turn_uid,
                            app_intent_with_template(&format!("resp_{i}")),
                        )
                        .await
                        .unwrap(),
                };
                let uid = stored.uid.unwrap();
                uids.push(uid);
                expected.insert(uid, *direction);
            }

            for (index, to_request) in moves {
                let uid = uids[index];
                let direction = if to_request {
                    Direction::Request
                } else {
                    Direction::Response
                };
                store
                    .update_turn_intent_relation(&turn_uid, &uid, direction)
                    .await
                    .unwrap();
                expected.insert(uid, direction);
            }

            let turn = store.get_turn(&turn_uid).await.unwrap();
            let on_request: Vec<_> = turn.request_intents.iter().filter_map(|i| i.uid).collect();
            let on_response: Vec<_> = turn.response_intents.iter().filter_map(|i| i.uid).collect();

            // Disjoint, and together exactly the stored intents.
            for uid in &on_request {
                assert!(!on_response.contains(uid));
            }
            assert_eq!(on_request.len() + on_response.len(), uids.len());

            // Every intent sits where it was last classified.
            for (uid, direction) in &expected {
                assert_eq!(turn.side_of(uid).as_ref(), Some(direction));
            }
        });
    }
}
