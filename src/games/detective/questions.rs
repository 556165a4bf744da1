//! The case files, asked in order.

use super::state::{Question, QuestionKind};

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "sms-link",
        title: "A text from the bank",
        story: "A text says: \"Suspicious activity! Confirm your identity now at bank-secure.example/verify\".",
        question: "Does this look like a scam?",
        kind: QuestionKind::Binary { correct: true },
        explanation: "Banks never ask you to confirm who you are through a link in a text. Links like this lead to fake sites.",
        points: Some(10),
    },
    Question {
        id: "call-code",
        title: "The code from a text",
        story: "Someone from \"bank security\" calls and asks you to read out the code you just got by text, so they can cancel a payment.",
        question: "Should you tell them the code?",
        kind: QuestionKind::Binary { correct: false },
        explanation: "Never share codes from texts or apps with anyone. The code is the key to your account.",
        points: Some(10),
    },
    Question {
        id: "mega-sale",
        title: "Super sale",
        story: "An online shop sells a game console for 1 coin, \"today only\". The site looks like a famous store but the address is strange.",
        question: "What is the right move?",
        kind: QuestionKind::Single {
            options: &[
                "Pay fast before it sells out",
                "Check the address and reviews, and don't pay if in doubt",
                "Message support and send your card details to check",
            ],
            correct_index: 1,
        },
        explanation: "Check the web address, the reviews and that payment is protected. Miracle prices almost never exist.",
        points: Some(15),
    },
    Question {
        id: "friend-urgent",
        title: "A \"friend\" in chat",
        story: "A \"friend\" writes in a messenger: they need money right now, their phone broke, please send it to this number.",
        question: "What should you do?",
        kind: QuestionKind::Single {
            options: &[
                "Send it straight away, they might be in trouble",
                "Call your real friend or your parents and check",
                "Send a photo of your card so they can take it themselves",
            ],
            correct_index: 1,
        },
        explanation: "Always check who is really writing. Accounts get hacked and profiles get faked.",
        points: Some(15),
    },
    Question {
        id: "qr-promo",
        title: "QR quest",
        story: "A poster at the bus stop says \"Scan the QR code and get a gift\".",
        question: "Is it safe to scan it and enter your card details?",
        kind: QuestionKind::Binary { correct: false },
        explanation: "Never enter card details after scanning a random QR code. Check where the offer really comes from first.",
        points: Some(10),
    },
    Question {
        id: "prize-fee",
        title: "You won!",
        story: "An email says: \"You won a smartphone! Pay a 300 coin fee to get your prize\".",
        question: "Is this fair?",
        kind: QuestionKind::Binary { correct: false },
        explanation: "Real prizes never ask for a fee up front. It is a trick to take your money.",
        points: Some(10),
    },
    Question {
        id: "wifi-login",
        title: "Public Wi-Fi",
        story: "The Wi-Fi in a cafe asks you to \"log in with your bank\" and type your online banking password.",
        question: "What do you do?",
        kind: QuestionKind::Single {
            options: &[
                "Type it in, everyone needs internet",
                "Don't enter anything and use mobile data instead",
                "Take a photo of the screen and send it to \"support\"",
            ],
            correct_index: 1,
        },
        explanation: "Never type bank details on public networks or on pages you don't know.",
        points: Some(15),
    },
    Question {
        id: "permissions-app",
        title: "An unknown app",
        story: "An app asks for access to your texts, calls and contacts for no reason.",
        question: "What is right?",
        kind: QuestionKind::Single {
            options: &[
                "Allow everything, it might come in handy",
                "Delete it or don't install it, and find the official app",
                "Send the developer your card number to \"verify\"",
            ],
            correct_index: 1,
        },
        explanation: "Download apps from official stores and check what permissions they ask for.",
        points: Some(10),
    },
    Question {
        id: "guru-profit",
        title: "Investment guru",
        story: "An ad promises \"+5% every day with no risk\". You just have to send money to their \"management company\".",
        question: "Should you believe it?",
        kind: QuestionKind::Binary { correct: false },
        explanation: "Guaranteed huge profits don't exist. This is a classic investment scam.",
        points: Some(10),
    },
    Question {
        id: "courier-prepay",
        title: "Courier prepayment",
        story: "A \"courier\" asks you to pay for delivery in advance by sending money to a personal card.",
        question: "Is it safe to send the money?",
        kind: QuestionKind::Binary { correct: false },
        explanation: "Sending money to a stranger's personal card has no protection. Use safe services and protected payments.",
        points: Some(10),
    },
];
