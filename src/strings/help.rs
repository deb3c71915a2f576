//! # Help Text
//!
//! Reference of the chat commands the bot understands.
//! Shown in the command-line `--help` output.

pub const COMMANDS: &str = concat!(
    "Chat commands (address the bot first, e.g. `hackbot create team Foo`):\n",
    "  can you see the api?          checks if the API is visible\n",
    "  create team <team name>       creates team <team name> and adds you to it\n",
    "  add @<username> to my team    adds @<username> to your team\n",
    "  kick @<username> from my team removes @<username> from your team\n",
    "  leave my team                 removes you from your current team\n",
    "  our motto is <motto>          sets your team's motto\n",
    "  find teams like <query>       displays up to three teams matching <query>\n",
    "  tell me about my team         displays information about your team\n",
    "  tell me about team <name>     displays information about a specific team\n",
    "  tell me about @<username>     displays which team @<username> is in\n",
    "\n",
    "Say `OK hackbot` (unaddressed) and the bot listens to your next messages\n",
    "for 30 seconds without needing to be addressed.\n"
);
