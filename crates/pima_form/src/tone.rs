/// Display colour shared by the BMI badge, the risk badge and the comparison bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
}

impl Tone {
    pub fn hex(self) -> &'static str {
        match self {
            Tone::Blue => "#3b82f6",
            Tone::Green => "#10b981",
            Tone::Yellow => "#eab308",
            Tone::Orange => "#f97316",
            Tone::Red => "#ef4444",
        }
    }
}
