// Carousel slide state.
//
// Pure state machine over the current post set and active slide index.
// Autoplay timing and change notification live in the web layer; this
// type only answers "which slide is active and what happens on next,
// previous, jump, load and clear".

use crate::posts::Post;

#[derive(Debug, Default)]
pub struct Carousel {
    posts: Vec<Post>,
    current: usize,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the post set and rewind to the first slide.
    pub fn load(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.current = 0;
    }

    /// Drop all posts. After a failed generation the carousel must not
    /// keep serving slides from the previous run.
    pub fn clear(&mut self) {
        self.posts.clear();
        self.current = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn current_post(&self) -> Option<&Post> {
        self.posts.get(self.current)
    }

    /// Advance one slide, wrapping after the last. No-op while empty.
    pub fn advance(&mut self) -> usize {
        if !self.posts.is_empty() {
            self.current = (self.current + 1) % self.posts.len();
        }
        self.current
    }

    /// Step back one slide, wrapping before the first. No-op while empty.
    pub fn rewind(&mut self) -> usize {
        if !self.posts.is_empty() {
            self.current = (self.current + self.posts.len() - 1) % self.posts.len();
        }
        self.current
    }

    /// Jump straight to a slide. Out-of-range indexes are refused and
    /// leave the state untouched.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.posts.len() {
            self.current = index;
            true
        } else {
            false
        }
    }
}
