// Live carousel state shared by all HTTP handlers and the autoplay task.
//
// The controller wraps the pure Carousel state machine with the things
// the server adds around it: a watch channel that fans slide changes out
// to SSE subscribers, and the autoplay timer that advances slides on a
// fixed cadence. Manual navigation re-arms the timer so a click is never
// followed by an immediate automatic advance.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::carousel::Carousel;
use crate::posts::Post;

/// One published carousel state. `generation` bumps whenever the post
/// set itself is replaced, so subscribers know to refetch posts instead
/// of just moving the active dot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlideFrame {
    pub index: usize,
    pub total: usize,
    pub generation: u64,
}

/// State the autoplay task shares with the handlers.
struct Shared {
    carousel: RwLock<Carousel>,
    frame_tx: watch::Sender<SlideFrame>,
}

impl Shared {
    fn publish_index(&self, index: usize) {
        self.frame_tx.send_modify(|frame| frame.index = index);
    }
}

pub struct CarouselController {
    shared: Arc<Shared>,
    autoplay: Mutex<Option<JoinHandle<()>>>,
    interval: Duration,
}

impl CarouselController {
    /// `interval` is the autoplay cadence; zero disables autoplay.
    pub fn new(interval: Duration) -> Self {
        let (frame_tx, _) = watch::channel(SlideFrame::default());
        Self {
            shared: Arc::new(Shared {
                carousel: RwLock::new(Carousel::new()),
                frame_tx,
            }),
            autoplay: Mutex::new(None),
            interval,
        }
    }

    /// Put a fresh post set on screen: rewind to the first slide, bump
    /// the generation and start the autoplay timer over.
    pub async fn show(&self, posts: Vec<Post>) {
        let mut slot = self.autoplay.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        let total = posts.len();
        self.shared.carousel.write().await.load(posts);
        self.shared.frame_tx.send_modify(|frame| {
            frame.index = 0;
            frame.total = total;
            frame.generation += 1;
        });
        self.arm(&mut slot).await;
    }

    /// Drop everything after a failed generation. The timer must not
    /// keep advancing over posts that no longer exist.
    pub async fn reset(&self) {
        let mut slot = self.autoplay.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        self.shared.carousel.write().await.clear();
        self.shared.frame_tx.send_modify(|frame| {
            frame.index = 0;
            frame.total = 0;
            frame.generation += 1;
        });
    }

    /// Manual step forward. Re-arms the autoplay timer.
    pub async fn next(&self) -> usize {
        self.rearm_autoplay().await;
        let index = self.shared.carousel.write().await.advance();
        self.shared.publish_index(index);
        index
    }

    /// Manual step back. Re-arms the autoplay timer.
    pub async fn previous(&self) -> usize {
        self.rearm_autoplay().await;
        let index = self.shared.carousel.write().await.rewind();
        self.shared.publish_index(index);
        index
    }

    /// Jump to a slide. Returns the new index, or None when out of range
    /// (state untouched, timer still re-armed).
    pub async fn go_to(&self, index: usize) -> Option<usize> {
        self.rearm_autoplay().await;
        let accepted = self.shared.carousel.write().await.go_to(index);
        if accepted {
            self.shared.publish_index(index);
            Some(index)
        } else {
            None
        }
    }

    /// Posts currently on screen plus the frame describing the active
    /// slide.
    pub async fn snapshot(&self) -> (Vec<Post>, SlideFrame) {
        let carousel = self.shared.carousel.read().await;
        (
            carousel.posts().to_vec(),
            self.shared.frame_tx.borrow().clone(),
        )
    }

    /// Clipboard text for the active slide, if any post is on screen.
    pub async fn clipboard_text(&self) -> Option<String> {
        let carousel = self.shared.carousel.read().await;
        carousel.current_post().map(Post::clipboard_block)
    }

    /// Subscribe to slide frames. The receiver immediately holds the
    /// current frame, then wakes on every change.
    pub fn subscribe(&self) -> watch::Receiver<SlideFrame> {
        self.shared.frame_tx.subscribe()
    }

    /// Abort the running timer and start a fresh one. The slot stays
    /// locked across abort and respawn: a store into the slot always
    /// replaces a handle that was just aborted, never a live one, so
    /// interleaved rearms cannot leak a running timer.
    async fn rearm_autoplay(&self) {
        let mut slot = self.autoplay.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        self.arm(&mut slot).await;
    }

    /// Spawn the interval task into the held slot. Does nothing when
    /// autoplay is disabled or no posts are on screen.
    async fn arm(&self, slot: &mut Option<JoinHandle<()>>) {
        if self.interval.is_zero() || self.shared.carousel.read().await.is_empty() {
            return;
        }
        let shared = Arc::clone(&self.shared);
        let interval = self.interval;
        *slot = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let index = shared.carousel.write().await.advance();
                shared.publish_index(index);
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::Caption;

    fn posts(n: u32) -> Vec<Post> {
        (1..=n)
            .map(|id| Post {
                id,
                image_description: format!("imagem {id}"),
                caption: Caption {
                    text: format!("legenda {id}"),
                    hashtags: "#fé".to_string(),
                },
            })
            .collect()
    }

    #[tokio::test]
    async fn show_publishes_a_new_generation() {
        let controller = CarouselController::new(Duration::ZERO);
        let rx = controller.subscribe();
        controller.show(posts(3)).await;

        let frame = rx.borrow().clone();
        assert_eq!(frame.index, 0);
        assert_eq!(frame.total, 3);
        assert_eq!(frame.generation, 1);
    }

    #[tokio::test]
    async fn manual_navigation_moves_the_published_index() {
        let controller = CarouselController::new(Duration::ZERO);
        controller.show(posts(3)).await;

        assert_eq!(controller.next().await, 1);
        assert_eq!(controller.next().await, 2);
        assert_eq!(controller.next().await, 0);
        assert_eq!(controller.previous().await, 2);
        assert_eq!(controller.subscribe().borrow().index, 2);
    }

    #[tokio::test]
    async fn go_to_rejects_out_of_range() {
        let controller = CarouselController::new(Duration::ZERO);
        controller.show(posts(2)).await;

        assert_eq!(controller.go_to(1).await, Some(1));
        assert_eq!(controller.go_to(5).await, None);
        assert_eq!(controller.subscribe().borrow().index, 1);
    }

    #[tokio::test]
    async fn reset_clears_posts_and_bumps_generation() {
        let controller = CarouselController::new(Duration::ZERO);
        controller.show(posts(3)).await;
        controller.reset().await;

        let (posts, frame) = controller.snapshot().await;
        assert!(posts.is_empty());
        assert_eq!(frame.total, 0);
        assert_eq!(frame.generation, 2);
        assert!(controller.clipboard_text().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_advances_on_the_configured_cadence() {
        let controller = CarouselController::new(Duration::from_secs(8));
        controller.show(posts(3)).await;
        // Let the timer task register its first sleep before moving the clock
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(8)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.subscribe().borrow().index, 1);

        tokio::time::advance(Duration::from_secs(8)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.subscribe().borrow().index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_navigation_rearms_the_autoplay_deadline() {
        let controller = CarouselController::new(Duration::from_secs(8));
        controller.show(posts(3)).await;
        tokio::task::yield_now().await;

        // 5s in, the user clicks next; the 8s window starts over
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(controller.next().await, 1);
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.subscribe().borrow().index, 1);

        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.subscribe().borrow().index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_navigation_leaves_a_single_timer() {
        let controller = CarouselController::new(Duration::from_secs(8));
        controller.show(posts(4)).await;
        tokio::task::yield_now().await;

        // Three clicks racing through the rearm path at once
        tokio::join!(controller.next(), controller.next(), controller.next());
        tokio::task::yield_now().await;
        let base = controller.subscribe().borrow().index;

        // Exactly one cadence step per period; a leaked timer from an
        // overwritten handle would advance the index twice per window
        tokio::time::advance(Duration::from_secs(8)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.subscribe().borrow().index, (base + 1) % 4);

        tokio::time::advance(Duration::from_secs(8)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.subscribe().borrow().index, (base + 2) % 4);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_stops_the_timer() {
        let controller = CarouselController::new(Duration::from_secs(8));
        controller.show(posts(3)).await;
        controller.reset().await;

        tokio::time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        let frame = controller.subscribe().borrow().clone();
        assert_eq!(frame.index, 0);
        assert_eq!(frame.total, 0);
    }
}
