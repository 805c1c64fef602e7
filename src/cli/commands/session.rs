use std::io::Write;

use onsite_domain::User;
use uuid::Uuid;

use super::CommandEntry;
use crate::{
    app::AppContext,
    cli::{args::ParsedArgs, output},
    errors::Result,
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Sign in (simulated, no credentials)",
            "login --name <name> [--id <id>] [--email <email>] [--phone <phone>] [--onboarding]",
            cmd_login,
        ),
        CommandEntry::new("demo-login", "Sign in as the demo account", "demo-login", cmd_demo_login),
        CommandEntry::new("logout", "Sign out", "logout", cmd_logout),
        CommandEntry::new("onboarded", "Mark onboarding complete", "onboarded", cmd_onboarded),
        CommandEntry::new("whoami", "Show the signed-in user", "whoami", cmd_whoami),
    ]
}

fn cmd_login(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    let name = args.require("name")?.trim().to_string();
    let id = args
        .get("id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("u_{}", &Uuid::new_v4().simple().to_string()[..8]));
    let mut user = User::new(id, name);
    if let Some(email) = args.get("email") {
        user = user.with_email(email);
    }
    if let Some(phone) = args.get("phone") {
        user = user.with_phone(phone);
    }
    context.session.login(user, args.switch("onboarding"))?;
    write_identity(context, out)
}

fn cmd_demo_login(context: &mut AppContext, _args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    context.session.demo_login()?;
    write_identity(context, out)
}

fn cmd_logout(context: &mut AppContext, _args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    context.session.logout()?;
    output::write_line(out, "Signed out.")
}

fn cmd_onboarded(context: &mut AppContext, _args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    context.session.complete_onboarding()?;
    write_identity(context, out)
}

fn cmd_whoami(context: &mut AppContext, _args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    write_identity(context, out)
}

fn write_identity(context: &AppContext, out: &mut dyn Write) -> Result<()> {
    let Some(user) = context.session.current_user() else {
        return output::write_line(out, "Not signed in.");
    };
    let mut line = format!("Signed in as {} ({})", user.name, user.id);
    if let Some(email) = &user.email {
        line.push_str(&format!(" <{}>", email));
    }
    if context.session.needs_onboarding() {
        line.push_str(", onboarding pending");
    }
    output::write_line(out, line)
}
