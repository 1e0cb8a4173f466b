//! The default assistant feature set.
//!
//! Every keyword and action phrase here has exactly one owner, so building
//! the set drops nothing. Order still matters for matching: features are
//! scanned in the order listed.

use crate::catalog::definition::FeatureDefinition;

/// Definitions for the built-in catalog.
pub fn builtin_definitions() -> Vec<FeatureDefinition> {
    vec![
        FeatureDefinition::new("Text")
            .keywords([
                "text",
                "document",
                "page",
                "story",
                "paragraph",
                "content",
                "text to speech",
            ])
            .action("Read", ["read aloud", "read", "narrate", "speak this"])
            .action("Translate", ["translate", "convert language", "change language"])
            .action("Save", ["save", "bookmark"])
            .aliases(["text", "reading", "read aloud", "narrate"]),
        FeatureDefinition::new("Currency")
            .keywords([
                "currency",
                "money",
                "bill",
                "coin",
                "cash",
                "dollar",
                "euro",
                "price",
                "exchange rate",
                "convert currency",
            ])
            .action("Identify", ["identify", "value"])
            .action("Convert", ["convert", "exchange", "calculate"])
            .aliases(["currency", "money", "exchange"]),
        FeatureDefinition::new("Object")
            .keywords([
                "object",
                "thing",
                "item",
                "what is this",
                "detection",
                "object recognition",
            ])
            .action("Identify", ["recognize", "detect", "spot"])
            .action("Describe", ["describe", "details", "tell me about", "information"])
            .aliases(["object", "thing", "item identification", "find"]),
        FeatureDefinition::new("Product")
            .keywords([
                "product",
                "brand",
                "logo",
                "goods",
                "merchandise",
                "barcode",
                "product details",
            ])
            .action("Identify", ["scan", "what product"])
            .action("Price", ["cost", "how much"])
            .action("Reviews", ["reviews", "ratings", "stars", "feedback"])
            .aliases(["product", "barcode", "logo", "brand"]),
        FeatureDefinition::new("Distance")
            .keywords(["distance", "range", "how far", "length"])
            .action("Measure", ["measure", "distance to", "length of"])
            .action("Compare", ["compare", "difference", "between"])
            .aliases(["distance", "measurement", "how far", "range"]),
        FeatureDefinition::new("Face")
            .keywords([
                "face",
                "person",
                "who is",
                "people",
                "recognize face",
                "face recognition",
            ])
            .action("Identify", ["who is this", "name"])
            .action("Remember", ["remember", "store", "add person"])
            .aliases(["face", "person", "recognition", "who is this"]),
        FeatureDefinition::new("Music")
            .keywords(["music", "song", "track", "tune", "audio", "listen", "melody"])
            .action(
                "Detect",
                ["what song", "identify song", "recognize song", "what's playing"],
            )
            .action("Play", ["play", "start", "begin", "resume", "continue"])
            .action("Pause", ["pause", "stop", "halt", "mute", "silence"])
            .aliases(["music", "song", "track", "audio", "listen"]),
        FeatureDefinition::new("News")
            .keywords([
                "news",
                "article",
                "headlines",
                "latest news",
                "current events",
                "news report",
                "blog",
                "report",
            ])
            .action("Summarize", ["summarize", "summary", "brief", "key points"])
            .action("Read", ["read the news", "read headlines", "read the article"])
            .aliases(["news", "articles", "headlines", "summary"]),
        FeatureDefinition::new("Chatbot")
            .keywords([
                "chat",
                "chatbot",
                "talk",
                "conversation",
                "assistant",
                "ask a question",
                "speak to",
            ])
            .action("Ask", ["ask", "question", "query", "inquire"])
            .action("Chat", ["converse", "small talk", "let's talk"])
            .aliases(["chat", "talk", "ask", "question", "assistant"]),
        FeatureDefinition::new("Help")
            .keywords(["help", "assist", "guide", "support", "help me", "i need help"])
            .action("Commands", ["what can you do", "commands", "how do i"])
            .aliases(["help", "support", "guide", "assist"]),
        FeatureDefinition::new("Capture")
            .keywords(["capture", "take a picture", "snapshot", "photo", "camera"])
            .action("Capture", ["take", "snap", "shoot"])
            .aliases(["camera", "picture", "photo", "capture"]),
    ]
}
