//! The skills story: a linear sequence of character scenes with typed dialogue.

use std::time::Duration;

use crate::typewriter::Typewriter;

/// Where the character stands on stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression {
    Soft,
    Thinking,
    Focused,
    Confident,
    Serious,
    Tired,
    Determined,
    Happy,
    Leader,
    Mastery,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryScene {
    pub id: u32,
    pub character: &'static str,
    pub expression: Expression,
    pub image: &'static str,
    pub stage: Stage,
    pub dialogue: &'static str,
    pub skills: &'static [&'static str],
    pub glow: bool,
    /// Depth the story camera moves to for this scene.
    pub camera_z: f32,
}

/// Plays scenes in order. Advancing while text is still typing completes the
/// line instead of moving on.
#[derive(Debug, Clone)]
pub struct StoryPlayer {
    scenes: Vec<StoryScene>,
    index: usize,
    typewriter: Typewriter,
}

impl StoryPlayer {
    pub fn new(scenes: Vec<StoryScene>, typing_interval: Duration) -> Self {
        let mut typewriter = Typewriter::new(typing_interval);
        if let Some(first) = scenes.first() {
            typewriter.reset(first.dialogue);
        }
        Self {
            scenes,
            index: 0,
            typewriter,
        }
    }

    /// The built-in story.
    pub fn builtin(typing_interval: Duration) -> Self {
        Self::new(story_script(), typing_interval)
    }

    pub fn current(&self) -> Option<&StoryScene> {
        self.scenes.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.scenes.len()
    }

    /// Player input. Returns true if anything changed.
    pub fn advance(&mut self) -> bool {
        if self.typewriter.is_stopped() {
            return false;
        }
        if self.typewriter.is_typing() {
            self.typewriter.finish();
            return true;
        }
        let Some(next) = self.scenes.get(self.index + 1) else {
            return false;
        };
        self.index += 1;
        self.typewriter.reset(next.dialogue);
        log::debug!("Story scene {} / {}", self.index + 1, self.scenes.len());
        true
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        self.typewriter.tick(dt)
    }

    pub fn is_typing(&self) -> bool {
        self.typewriter.is_typing()
    }

    pub fn displayed_text(&self) -> &str {
        self.typewriter.displayed()
    }

    pub fn skills_visible(&self) -> bool {
        !self.is_typing() && self.current().is_some_and(|s| !s.skills.is_empty())
    }

    pub fn continue_prompt_visible(&self) -> bool {
        !self.is_typing() && !self.is_empty()
    }

    pub fn camera_z(&self) -> f32 {
        self.current().map_or(0.0, |s| s.camera_z)
    }

    /// Tear down; no later tick or advance changes the display.
    pub fn stop(&mut self) {
        self.typewriter.stop();
    }
}

pub fn story_script() -> Vec<StoryScene> {
    vec![
        StoryScene {
            id: 1,
            character: "Moo",
            expression: Expression::Soft,
            image: "/assets/girl/image1.png",
            stage: Stage::Center,
            dialogue: "At the beginning, I was just curious. I didn't know what I wanted to become, but I knew I loved creating things.",
            skills: &[],
            glow: false,
            camera_z: 0.0,
        },
        StoryScene {
            id: 2,
            character: "Moo",
            expression: Expression::Thinking,
            image: "/assets/girl/image2.png",
            stage: Stage::Left,
            dialogue: "I started learning how the web works. Every small success felt like magic.",
            skills: &["HTML", "CSS", "JavaScript"],
            glow: true,
            camera_z: -8.0,
        },
        StoryScene {
            id: 3,
            character: "Moo",
            expression: Expression::Focused,
            image: "/assets/girl/image3.png",
            stage: Stage::Right,
            dialogue: "When things broke, I didn't give up. I learned how to debug, one error at a time.",
            skills: &["Problem Solving", "Debugging"],
            glow: true,
            camera_z: -18.0,
        },
        StoryScene {
            id: 4,
            character: "Moo",
            expression: Expression::Confident,
            image: "/assets/girl/image4.png",
            stage: Stage::Right,
            dialogue: "I fell in love with building interfaces that feel alive, smooth, and meaningful.",
            skills: &["React", "UI Design", "Animations"],
            glow: true,
            camera_z: -28.0,
        },
        StoryScene {
            id: 5,
            character: "Moo",
            expression: Expression::Serious,
            image: "/assets/girl/image5.png",
            stage: Stage::Left,
            dialogue: "Behind the scenes, I learned how systems talk to each other and how data flows.",
            skills: &["Backend", "API Design", "Databases"],
            glow: true,
            camera_z: -40.0,
        },
        StoryScene {
            id: 6,
            character: "Moo",
            expression: Expression::Tired,
            image: "/assets/girl/image6.png",
            stage: Stage::Left,
            dialogue: "There were nights I felt stuck. But every challenge made me stronger.",
            skills: &["Resilience", "Self-learning"],
            glow: false,
            camera_z: -54.0,
        },
        StoryScene {
            id: 7,
            character: "Moo",
            expression: Expression::Determined,
            image: "/assets/girl/image7.png",
            stage: Stage::Right,
            dialogue: "I began structuring my code, thinking about scalability and clarity.",
            skills: &["Clean Code", "Architecture"],
            glow: true,
            camera_z: -70.0,
        },
        StoryScene {
            id: 8,
            character: "Moo",
            expression: Expression::Happy,
            image: "/assets/girl/image8.png",
            stage: Stage::Right,
            dialogue: "Working with others taught me how important communication and empathy are.",
            skills: &["Teamwork", "Communication"],
            glow: true,
            camera_z: -86.0,
        },
        StoryScene {
            id: 9,
            character: "Moo",
            expression: Expression::Leader,
            image: "/assets/girl/image9.png",
            stage: Stage::Left,
            dialogue: "I learned how to guide projects, make decisions, and take responsibility.",
            skills: &["Leadership", "Ownership"],
            glow: true,
            camera_z: -104.0,
        },
        StoryScene {
            id: 10,
            character: "Moo",
            expression: Expression::Mastery,
            image: "/assets/girl/image10.png",
            stage: Stage::Center,
            dialogue: "This is not the end of my story. I'm still learning, still growing, and still dreaming.",
            skills: &["Full-Stack", "Problem Solver", "Creative Thinker"],
            glow: true,
            camera_z: -130.0,
        },
    ]
}
