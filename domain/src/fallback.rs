//! Keyword-driven replies used when the chat service cannot be reached.
//!
//! Input is matched against an ordered table of word-boundary patterns. The
//! first category that matches wins and a reply is picked uniformly from its
//! pool; anything unmatched falls through to the conversational default.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Help,
    Savings,
    Investment,
    Budget,
    Goals,
    Debt,
    Thanks,
    Default,
}

impl Intent {
    /// Matching order. Earlier entries win when several keyword sets match.
    pub const PRIORITY: [Intent; 8] = [
        Intent::Greeting,
        Intent::Help,
        Intent::Savings,
        Intent::Investment,
        Intent::Budget,
        Intent::Goals,
        Intent::Debt,
        Intent::Thanks,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Greeting => &["hi", "hello", "hey", "greetings", "sup", "yo"],
            Intent::Help => &["help", "guide", "advice", "suggest", "lost", "confused", "don't know"],
            Intent::Savings => &["save", "saving", "savings", "emergency fund"],
            Intent::Investment => &["invest", "investment", "stock", "portfolio", "crypto", "etf"],
            Intent::Budget => &["budget", "spending", "expense", "money", "bills"],
            Intent::Goals => &["goal", "target", "plan", "dream", "want to", "wish"],
            Intent::Debt => &["debt", "loan", "credit card", "owe", "payment"],
            Intent::Thanks => &["thank", "thanks", "appreciate", "grateful"],
            Intent::Default => &[],
        }
    }

    pub fn pool(self) -> &'static [&'static str] {
        match self {
            Intent::Greeting => GREETING_REPLIES,
            Intent::Help => HELP_REPLIES,
            Intent::Savings => SAVINGS_REPLIES,
            Intent::Investment => INVESTMENT_REPLIES,
            Intent::Budget => BUDGET_REPLIES,
            Intent::Goals => GOAL_REPLIES,
            Intent::Debt => DEBT_REPLIES,
            Intent::Thanks => THANKS_REPLIES,
            Intent::Default => DEFAULT_REPLIES,
        }
    }
}

/// A keyword matcher paired with the replies it unlocks.
pub struct ReplyCategory {
    pub intent: Intent,
    pub matcher: Regex,
}

impl ReplyCategory {
    fn for_intent(intent: Intent) -> Self {
        let alternatives = intent
            .keywords()
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = Regex::new(&format!(r"(?-u:\b)({alternatives})(?-u:\b)"))
            .unwrap_or_else(|e| panic!("invalid keyword pattern for {intent:?}: {e}"));
        Self { intent, matcher }
    }
}

static CATEGORIES: Lazy<Vec<ReplyCategory>> = Lazy::new(|| {
    Intent::PRIORITY
        .iter()
        .copied()
        .map(ReplyCategory::for_intent)
        .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResponder;

impl FallbackResponder {
    pub fn new() -> Self {
        Self
    }

    /// The ordered category table.
    pub fn categories(&self) -> &'static [ReplyCategory] {
        &CATEGORIES
    }

    pub fn classify(&self, input: &str) -> Intent {
        let lowered = input.to_lowercase();
        self.categories()
            .iter()
            .find(|category| category.matcher.is_match(&lowered))
            .map(|category| category.intent)
            .unwrap_or(Intent::Default)
    }

    /// Pick a reply for `input`. Never fails; unmatched input gets a default reply.
    pub fn classify_and_reply<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> &'static str {
        pick(self.classify(input).pool(), rng)
    }

    /// Whether `text` is one of the canned fallback replies.
    pub fn is_fallback_reply(&self, text: &str) -> bool {
        Intent::PRIORITY
            .iter()
            .chain(std::iter::once(&Intent::Default))
            .any(|intent| intent.pool().contains(&text))
    }
}

/// Uniform choice from a non-empty pool.
pub fn pick<R: Rng + ?Sized>(pool: &'static [&'static str], rng: &mut R) -> &'static str {
    pool[rng.gen_range(0..pool.len())]
}

/// Opening lines for a fresh session.
pub const WARM_GREETINGS: &[&str] = &[
    "Hello. I'm Astra. How can I help you navigate your finances today?",
    "Welcome. I'm here to provide clarity on your financial journey.",
    "Hi there. Ready to explore your options?",
];

const GREETING_REPLIES: &[&str] = &[
    "Hey! 😊 So glad you're here! I'm Astra, and I'm genuinely excited to help you take control of your finances. What's been on your mind lately?",
    "Hello there! 👋 I'm Astra, your AI financial buddy. Think of me as that friend who actually enjoys talking about money (I know, rare, right?). What can I help you with today?",
    "Hi! 🌟 Great to meet you! I'm here to make finance feel less scary and more... well, fun! What would you like to explore first?",
];

const HELP_REPLIES: &[&str] = &[
    "I totally get it—finance can feel overwhelming sometimes! 💙 But here's the thing: you're already doing great by asking for help. Let's break this down together. What specific area feels most confusing right now?",
    "You know what? Everyone feels this way at some point, and that's completely okay! 🤗 I'm here to make things crystal clear. Whether it's budgeting, saving, or investing—let's tackle it step by step. Where should we start?",
    "Hey, no worries at all! That's exactly what I'm here for. 💪 Think of me as your personal finance translator—I turn complicated money stuff into simple, actionable steps. What's the biggest question on your mind?",
];

const SAVINGS_REPLIES: &[&str] = &[
    "Ooh, I love that you're thinking about saving! 💰 Here's a little secret: the best savers aren't the ones who make the most—they're the ones who save consistently. Even $20 a week adds up to over $1,000 a year! Want me to help you set up an automatic savings plan?",
    "Smart move! 🎯 Saving is like planting a money tree—it takes time, but future you will be SO grateful. I usually recommend starting with a small emergency fund (think $500-1000), then building from there. How much do you think you could comfortably set aside each month?",
    "Yes! Saving is the foundation of everything else. 🌱 Here's what works for most people: pay yourself first. Before bills, before fun stuff—set aside your savings. It's like giving future you a gift. Should we figure out a realistic savings goal together?",
];

const INVESTMENT_REPLIES: &[&str] = &[
    "Investing! Now we're talking! 📈 Here's the honest truth: investing isn't about getting rich quick—it's about building wealth steadily over time. The stock market has historically returned about 10% annually. Even starting with $100/month can grow to over $200K in 30 years! Interested in learning more?",
    "Great question! 💡 Investing can seem intimidating, but it's actually pretty straightforward once you understand the basics. My philosophy? Start simple with index funds, diversify, and think long-term. How much risk are you comfortable with? That'll help me point you in the right direction.",
    "Love your ambition! 🚀 Investing is one of the best ways to build real wealth. But here's what most people don't tell you: the best investment strategy is the one you'll actually stick with. Let's find something that matches your goals and comfort level. What's your timeline—are we talking 5 years or 30?",
];

const BUDGET_REPLIES: &[&str] = &[
    "Budgeting! Okay, I know it sounds boring, but hear me out—it's actually kind of empowering. 📊 When you know exactly where your money goes, you stop feeling guilty about spending and start feeling in control. Want me to show you a simple budgeting method that actually works?",
    "Let's talk budgets! 💳 Here's the thing: a budget isn't about restricting yourself—it's about making sure your money goes toward things you actually care about. I've seen people save hundreds just by cutting subscriptions they forgot they had! Ready to see where your money's really going?",
    "Ah, the B-word! 😅 I get it, budgeting doesn't sound fun. But what if I told you it could help you afford that thing you've been wanting? It's true! A good budget is like a roadmap—it shows you how to get from where you are to where you want to be. Shall we create one together?",
];

const GOAL_REPLIES: &[&str] = &[
    "I LOVE goal-oriented thinking! 🎯 You know what separates dreamers from achievers? A solid plan. Tell me about your goal—whether it's buying a house, traveling the world, or retiring early—and I'll help you create a realistic roadmap to get there. What's your big dream?",
    "Yes! Goals are what make all this money stuff meaningful! 🌟 Here's what I've learned: specific goals with deadlines are 10x more likely to happen than vague wishes. So instead of 'save more,' it's 'save $5,000 by December for a down payment.' See the difference? What's your goal?",
    "Ooh, I get excited about goals! 💫 Because here's the secret: every financial goal is actually achievable with the right strategy. Whether it's 6 months away or 6 years away, we can break it down into bite-sized steps. What are you working toward?",
];

const DEBT_REPLIES: &[&str] = &[
    "Hey, first of all—no judgment here. 💙 Debt is super common, and the fact that you're addressing it shows real strength. Let's tackle this together. There are proven strategies like the debt snowball or avalanche method that actually work. Want to explore which one fits your situation?",
    "I hear you, and I want you to know: you're not alone in this. 🤗 Millions of people deal with debt, and many have successfully paid it off. The key is having a clear plan. Should we look at your interest rates and create a payoff strategy that won't make you feel deprived?",
    "Debt can feel heavy, I get it. 😔 But here's some good news: with the right approach, you can absolutely get out of it. I've seen people pay off tens of thousands by following a solid plan. The first step? Understanding exactly what you owe and to whom. Ready to map it out?",
];

const THANKS_REPLIES: &[&str] = &[
    "Aw, you're so welcome! 🥰 Honestly, helping people like you is why I exist. Your financial success is my success! Anything else you want to chat about?",
    "Hey, that's what I'm here for! 😊 I genuinely love helping people take control of their money. It's like... my thing. What else can I help you with today?",
    "You're very welcome! 💙 Seriously though, thank YOU for trusting me with your financial journey. That means a lot. What's next on your mind?",
];

const DEFAULT_REPLIES: &[&str] = &[
    "Hmm, interesting! 🤔 I want to make sure I give you the best advice possible. Could you tell me a bit more about what you're trying to achieve? The more I understand your situation, the better I can help!",
    "You know what? I love where your head's at! 💭 Let me ask you this: what's the outcome you're hoping for? Whether it's more savings, less stress, or just understanding your money better—I'm here to make it happen.",
    "Great question! 🌟 Here's the thing—everyone's financial situation is unique, so I want to give you advice that actually fits YOUR life. Can you share a bit more context? Like, what's your biggest financial priority right now?",
    "I'm picking up what you're putting down! 😄 Finance is personal, so let's make this about YOU. What would success look like for you? More money in the bank? Less debt? Better investments? Tell me your vision!",
];
