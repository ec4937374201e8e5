//! Cooperative scheduling: yield to the host every N work items.
//!
//! The host decides what "next turn" means. In the browser it is the next
//! animation frame; natively it resolves immediately.

use std::rc::Rc;

use crate::error::Result;

/// Host scheduling hook awaited between batches of work.
#[allow(async_fn_in_trait)]
pub trait FrameScheduler {
    /// Resolve at the host's next opportunity to paint.
    async fn next_frame(&self);
}

impl<T: FrameScheduler> FrameScheduler for Rc<T> {
    async fn next_frame(&self) {
        (**self).next_frame().await;
    }
}

/// Scheduler that never waits. Used for static rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl FrameScheduler for Immediate {
    async fn next_frame(&self) {}
}

/// Scheduler backed by `window.requestAnimationFrame`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrame;

#[cfg(target_arch = "wasm32")]
impl FrameScheduler for AnimationFrame {
    async fn next_frame(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, _reject| {
            if window.request_animation_frame(&resolve).is_err() {
                let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
            }
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }
}

/// Feed `items` to `f` in batches of at most `chunk_size`, awaiting the
/// scheduler before each batch.
///
/// Batches preserve item order. Returns the number of batches (scheduling
/// turns). An error from `f` stops the loop; no further turns are taken.
pub async fn for_each_chunk<I, S, F>(
    items: I,
    chunk_size: usize,
    scheduler: &S,
    mut f: F,
) -> Result<usize>
where
    I: IntoIterator,
    S: FrameScheduler,
    F: FnMut(usize, Vec<I::Item>) -> Result<()>,
{
    let chunk_size = chunk_size.max(1);
    let mut items = items.into_iter().peekable();
    let mut turns = 0;
    while items.peek().is_some() {
        scheduler.next_frame().await;
        let batch: Vec<I::Item> = items.by_ref().take(chunk_size).collect();
        f(turns, batch)?;
        turns += 1;
    }
    Ok(turns)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::ViewerError;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counting {
        turns: Cell<usize>,
    }

    impl FrameScheduler for Counting {
        async fn next_frame(&self) {
            self.turns.set(self.turns.get() + 1);
        }
    }

    #[tokio::test]
    async fn test_batches_preserve_order() {
        let scheduler = Counting::default();
        let mut seen = Vec::new();
        let turns = for_each_chunk(1..=7, 3, &scheduler, |_, batch| {
            seen.push(batch);
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(turns, 3);
        assert_eq!(scheduler.turns.get(), 3);
        assert_eq!(seen, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[tokio::test]
    async fn test_empty_input_takes_no_turns() {
        let scheduler = Counting::default();
        let turns = for_each_chunk(Vec::<u32>::new(), 10, &scheduler, |_, _| Ok(()))
            .await
            .unwrap();
        assert_eq!(turns, 0);
        assert_eq!(scheduler.turns.get(), 0);
    }

    #[tokio::test]
    async fn test_error_stops_further_turns() {
        let scheduler = Counting::default();
        let result = for_each_chunk(1..=10, 2, &scheduler, |turn, _| {
            if turn == 1 {
                Err(ViewerError::Surface("detached".into()))
            } else {
                Ok(())
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(scheduler.turns.get(), 2);
    }

    #[tokio::test]
    async fn test_zero_chunk_size_means_one() {
        let turns = for_each_chunk(0..4, 0, &Immediate, |_, batch| {
            assert_eq!(batch.len(), 1);
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(turns, 4);
    }
}
