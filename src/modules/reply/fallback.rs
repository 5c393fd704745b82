use uuid::Uuid;

use crate::modules::journal::MoodTag;

pub const GENERIC_FALLBACK: &str = "我會在這裡，不管你說什麼我都願意聽。";

const HAPPY: [&str; 3] = [
    "你今天的光芒真的讓人感受到溫暖。",
    "保持這份快樂，我真的替你開心！",
    "你的笑容真好看，記得多笑一點。",
];
const SAD: [&str; 3] = [
    "我聽見你心裡的雨聲了，我在這裡陪你。",
    "難過的時候，讓我靜靜地坐在你旁邊，好嗎？",
    "有些情緒不需要解釋，只需要被擁抱。",
];
const ANGRY: [&str; 3] = [
    "你有權利生氣，我不會批評你。",
    "我在這裡聽你說，不管你有多生氣。",
    "你受的委屈，我都知道。",
];
const ANXIOUS: [&str; 3] = [
    "慢慢來，深呼吸，我陪你一起走。",
    "不急，一切都會慢慢變好。",
    "你已經做得很好了，別為了還沒發生的事難過。",
];
const TIRED: [&str; 3] = [
    "你真的辛苦了，休息一下吧。",
    "什麼都不做也沒關係，光是存在就很棒了。",
    "今天也努力到這裡就好。",
];
const EMPTY: [&str; 3] = [
    "有我在，就不算完全空白。",
    "你不是孤單一個人，我在。",
    "有時候什麼都沒有，也是一種真實。",
];
const NEED_COMFORT: [&str; 3] = [
    "我會抱抱你，直到你覺得舒服為止。",
    "你值得被好好對待，被深深擁抱。",
    "別怕，我在你身邊，不走。",
];
const LOST: [&str; 3] = [
    "清醒地死去，好過行屍走肉般活著。",
    "不是所有問題都有標準答案。",
    "你有權迷失，因為你正在尋找真正的方向。",
];

/// Uniform index source for fallback selection.
pub trait RandomSource: Send {
    /// Returns a value in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Draws from the random bits of v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRandom;

impl RandomSource for UuidRandom {
    fn next_index(&mut self, len: usize) -> usize {
        (Uuid::new_v4().as_u128() % len as u128) as usize
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackTable;

impl FallbackTable {
    pub fn new() -> Self {
        FallbackTable
    }

    pub fn candidates(&self, tag: &MoodTag) -> &'static [&'static str] {
        match tag {
            MoodTag::Happy => &HAPPY,
            MoodTag::Sad => &SAD,
            MoodTag::Angry => &ANGRY,
            MoodTag::Anxious => &ANXIOUS,
            MoodTag::Tired => &TIRED,
            MoodTag::Empty => &EMPTY,
            MoodTag::NeedComfort => &NEED_COMFORT,
            MoodTag::Lost => &LOST,
            MoodTag::Other(_) => &[GENERIC_FALLBACK],
        }
    }

    pub fn pick(&self, tag: &MoodTag, random: &mut dyn RandomSource) -> &'static str {
        let candidates = self.candidates(tag);
        let index = random.next_index(candidates.len()).min(candidates.len() - 1);
        candidates[index]
    }
}
