/// Flips a switch in place and reports the state it ended up in.
pub trait Toggle {
    fn toggle(&mut self) -> bool;
}

impl Toggle for bool {
    fn toggle(&mut self) -> bool {
        *self = !*self;
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_returns_new_state() {
        let mut enabled = false;
        assert!(enabled.toggle());
        assert!(enabled);
        assert!(!enabled.toggle());
        assert!(!enabled);
    }
}
