use crate::puzzle::color::ColorId;

/// A single bottle: a capacity-bounded stack of colored layers.
///
/// Layers are stored bottom to top and only ever pushed or popped at the
/// top; nothing inserts in the middle. Capacity is fixed for the bottle's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bottle {
    capacity: usize,
    layers: Vec<ColorId>,
}

impl Bottle {
    /// Builds a bottle from bottom-to-top layers. Callers validate
    /// `layers.len() <= capacity` and `capacity > 0` before construction
    /// (see [`build_board`](crate::puzzle::spec::build_board)).
    pub fn new(capacity: usize, layers: Vec<ColorId>) -> Self {
        debug_assert!(capacity > 0);
        debug_assert!(layers.len() <= capacity);
        Self { capacity, layers }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn layers(&self) -> &[ColorId] {
        &self.layers
    }

    /// The color of the top layer, or `None` for an empty bottle.
    pub fn top_color(&self) -> Option<ColorId> {
        self.layers.last().copied()
    }

    pub fn is_full(&self) -> bool {
        self.layers.len() == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// True when every layer matches the bottom layer. Vacuously true for an
    /// empty bottle.
    pub fn is_uniform(&self) -> bool {
        match self.layers.first() {
            Some(bottom) => self.layers.iter().all(|c| c == bottom),
            None => true,
        }
    }

    /// Length of the contiguous run of the top color, counted from the top.
    /// 0 for an empty bottle.
    pub fn top_run_len(&self) -> usize {
        match self.top_color() {
            Some(top) => self.layers.iter().rev().take_while(|c| **c == top).count(),
            None => 0,
        }
    }

    /// Whether one layer of `color` may be pushed: never when full,
    /// otherwise when empty or the top color matches.
    pub fn can_receive(&self, color: ColorId) -> bool {
        if self.is_full() {
            return false;
        }
        match self.top_color() {
            Some(top) => top == color,
            None => true,
        }
    }

    /// The pour legality rule.
    ///
    /// A uniform source (the empty bottle included) never pours into an
    /// empty destination: a full uniform bottle is already solved, an empty
    /// bottle has nothing to give, and shuffling a uniform bottle into an
    /// empty one only produces a cyclic, useless state. Past that gate the
    /// destination must accept the top color and — the whole-run rule — the
    /// entire contiguous top run must fit. Partial pours of a run are never
    /// legal.
    pub fn can_pour_into(&self, dest: &Bottle) -> bool {
        if self.is_uniform() && (dest.is_empty() || self.is_empty() || self.is_full()) {
            return false;
        }
        let Some(top) = self.top_color() else {
            return false;
        };
        if !dest.can_receive(top) {
            return false;
        }
        self.top_run_len() + dest.layers.len() <= dest.capacity
    }

    /// Transfers the entire contiguous top run into `dest`, returning the
    /// number of layers moved.
    ///
    /// Precondition: `self.can_pour_into(dest)`. Moving zero layers after
    /// the precondition held is a bug in the legality rule, not a user
    /// error, so it panics.
    pub fn pour_into(&mut self, dest: &mut Bottle) -> usize {
        let mut moved = 0;
        while let Some(top) = self.top_color() {
            if !dest.can_receive(top) {
                break;
            }
            self.layers.pop();
            dest.layers.push(top);
            moved += 1;
        }
        if moved == 0 {
            panic!("pour_into transferred no layers after can_pour_into held");
        }
        moved
    }

    /// Free slots remaining.
    pub fn space(&self) -> usize {
        self.capacity - self.layers.len()
    }

    // Raw stack access for the puzzle generator, which moves layers against
    // the color-match rule on purpose (a scramble step is the inverse of a
    // legal pour, not a pour).
    pub(crate) fn pop_layer(&mut self) -> Option<ColorId> {
        self.layers.pop()
    }

    pub(crate) fn push_layer_unchecked(&mut self, color: ColorId) {
        debug_assert!(self.layers.len() < self.capacity);
        self.layers.push(color);
    }
}
