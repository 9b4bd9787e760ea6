//! Presentation side of the ledger: runs script rows and renders their results.
//!
//! A [`Session`] stands in for the logged in user. Only `sign_up`, `login` and `logout` work
//! without one.

use crate::{
    account::AccountApplication,
    csv::{Outcome, RawCommand, RawOp, ScriptRow, Status},
    errors::ScriptErr,
    ledger::Ledger,
};
use anyhow::Context;
use rust_decimal::Decimal;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info};

/// Who is logged in for the rest of the script
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    /// logged in username
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn require_login(&self) -> Result<(), ScriptErr> {
        self.user.as_ref().map(|_| ()).ok_or(ScriptErr::LoginRequired)
    }
}

/// Run one script row against `ledger` and describe what happened
pub fn apply_command(
    ledger: &mut Ledger,
    session: &mut Session,
    row: usize,
    cmd: RawCommand,
) -> Outcome {
    let op = cmd.op;
    let (status, message) = match run(ledger, session, cmd) {
        Ok(message) => (Status::Ok, message),
        Err(e) => {
            debug!(row, ?op, error = %e, "operation rejected");
            (Status::Error, e.to_string())
        }
    };

    Outcome {
        row,
        op,
        status,
        message,
    }
}

fn run(ledger: &mut Ledger, session: &mut Session, cmd: RawCommand) -> Result<String, ScriptErr> {
    let op = required(cmd.op, "op")?;
    if needs_login(op) {
        session.require_login()?;
    }

    match op {
        RawOp::SignUp => {
            ledger.create_user(&required(cmd.user, "user")?, &required(cmd.password, "password")?)?;
            Ok("User created successfully".to_owned())
        }
        RawOp::Login => {
            let user = required(cmd.user, "user")?;
            if !ledger.validate_user(&user, &required(cmd.password, "password")?) {
                return Err(ScriptErr::InvalidLogin);
            }
            let message = format!("Logged in as {user}");
            session.user = Some(user);
            Ok(message)
        }
        RawOp::Logout => {
            session.user = None;
            Ok("Logged out".to_owned())
        }
        RawOp::OpenAccount => {
            let holder = required(cmd.holder, "holder")?;
            let mut application = AccountApplication::new(
                holder.clone(),
                required(cmd.age, "age")?,
                required(cmd.address, "address")?,
                required(cmd.kind, "kind")?,
                required(cmd.pin, "pin")?,
            )
            .initial_deposit(cmd.amount.unwrap_or(Decimal::ZERO));
            if let Some(joint) = cmd.joint {
                application = application.joint_holder(joint);
            }
            if let Some(email) = cmd.email {
                application = application.email(email);
            }
            if let Some(mobile) = cmd.mobile {
                application = application.mobile(mobile);
            }

            let number = ledger.create_account(application)?;
            Ok(format!(
                "Account created successfully for {holder}. Account Number: {number}"
            ))
        }
        RawOp::Balance => {
            let balance = ledger.get_balance(
                &required(cmd.account, "account")?,
                &required(cmd.pin, "pin")?,
            )?;
            Ok(format!("Current Balance: {balance}"))
        }
        RawOp::Notifications => {
            let notifications = ledger.get_notifications(
                &required(cmd.account, "account")?,
                &required(cmd.pin, "pin")?,
            )?;
            if notifications.is_empty() {
                return Ok("No notifications.".to_owned());
            }
            let messages: Vec<_> = notifications.iter().map(|n| n.message()).collect();
            Ok(messages.join("; "))
        }
        RawOp::FixedDeposit => {
            let id = ledger.create_fixed_deposit(
                &required(cmd.account, "account")?,
                required(cmd.amount, "amount")?,
                &required(cmd.kind, "kind")?,
                &required(cmd.pin, "pin")?,
            )?;
            Ok(format!("Fixed deposit {id} created successfully"))
        }
        RawOp::Loan => {
            let id = ledger.apply_for_loan(
                &required(cmd.account, "account")?,
                &required(cmd.kind, "kind")?,
                required(cmd.amount, "amount")?,
                required(cmd.months, "months")?,
                &required(cmd.pin, "pin")?,
            )?;
            Ok(format!("Loan {id} applied successfully"))
        }
        RawOp::PayEmi => {
            let loan = required(cmd.loan, "loan")?;
            ledger.pay_loan_emi(
                &loan,
                &required(cmd.account, "account")?,
                &required(cmd.pin, "pin")?,
            )?;
            Ok(format!("EMI paid for loan {loan}"))
        }
    }
}

fn needs_login(op: RawOp) -> bool {
    !matches!(op, RawOp::SignUp | RawOp::Login | RawOp::Logout)
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ScriptErr> {
    value.ok_or(ScriptErr::MissingField(field))
}

/// Apply every row from `input` in order and send its outcome to `output`.
///
/// This task is the only owner of the ledger while the script runs. The ledger is handed back
/// once `input` is closed.
pub async fn serve_commands(
    mut ledger: Ledger,
    mut input: Receiver<ScriptRow>,
    output: Sender<Outcome>,
) -> anyhow::Result<Ledger> {
    let mut session = Session::default();
    let mut applied = 0;

    while let Some((row, cmd)) = input.recv().await {
        let outcome = apply_command(&mut ledger, &mut session, row, cmd);
        output.send(outcome).await.context("outcome writer stopped")?;
        applied += 1;
    }

    info!(rows = applied, accounts = ledger.accounts().count(), "script finished");
    Ok(ledger)
}

#[cfg(test)]
mod test {
    use super::{apply_command, serve_commands, Session};
    use crate::{
        csv::{Outcome, RawCommand, RawOp, Status},
        ledger::Ledger,
    };
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc::channel;
    use tokio_stream::{wrappers::ReceiverStream, StreamExt};

    fn cmd(op: RawOp) -> RawCommand {
        RawCommand {
            op: Some(op),
            ..Default::default()
        }
    }

    fn login() -> Vec<RawCommand> {
        vec![
            RawCommand {
                user: Some("alice".into()),
                password: Some("secret".into()),
                ..cmd(RawOp::SignUp)
            },
            RawCommand {
                user: Some("alice".into()),
                password: Some("secret".into()),
                ..cmd(RawOp::Login)
            },
        ]
    }

    fn open_account() -> RawCommand {
        RawCommand {
            holder: Some("Alice".into()),
            age: Some(30),
            address: Some("1 Main St".into()),
            kind: Some("savings".into()),
            pin: Some("1234".into()),
            amount: Some(dec!(1000)),
            ..cmd(RawOp::OpenAccount)
        }
    }

    fn run_all(ledger: &mut Ledger, commands: Vec<RawCommand>) -> Vec<Outcome> {
        let mut session = Session::default();
        commands
            .into_iter()
            .enumerate()
            .map(|(i, c)| apply_command(ledger, &mut session, i + 1, c))
            .collect()
    }

    #[test]
    fn account_operations_need_login() {
        let mut ledger = Ledger::default();
        let outcomes = run_all(&mut ledger, vec![open_account()]);

        assert_eq!(outcomes[0].status, Status::Error);
        assert_eq!(outcomes[0].message, "login required");
        assert_eq!(ledger.accounts().count(), 0);
    }

    #[test]
    fn failed_login_keeps_user_logged_out() {
        let mut ledger = Ledger::default();
        let mut commands = login();
        commands[1].password = Some("wrong".into());
        commands.push(open_account());

        let outcomes = run_all(&mut ledger, commands);
        assert_eq!(outcomes[0].status, Status::Ok);
        assert_eq!(outcomes[1].message, "invalid username or password");
        assert_eq!(outcomes[2].message, "login required");
    }

    #[test]
    fn logout_ends_session() {
        let mut ledger = Ledger::default();
        let mut commands = login();
        commands.push(cmd(RawOp::Logout));
        commands.push(open_account());

        let outcomes = run_all(&mut ledger, commands);
        assert_eq!(outcomes[2].message, "Logged out");
        assert_eq!(outcomes[3].message, "login required");
    }

    #[test]
    fn renders_successful_operations() {
        let mut ledger = Ledger::default();
        let mut commands = login();
        commands.push(open_account());
        commands.push(RawCommand {
            account: Some("ACC000001".into()),
            pin: Some("1234".into()),
            kind: Some("personal".into()),
            amount: Some(dec!(5000)),
            months: Some(12),
            ..cmd(RawOp::Loan)
        });
        commands.push(RawCommand {
            account: Some("ACC000001".into()),
            pin: Some("1234".into()),
            loan: Some("LOAN000001".into()),
            ..cmd(RawOp::PayEmi)
        });
        commands.push(RawCommand {
            account: Some("ACC000001".into()),
            pin: Some("1234".into()),
            ..cmd(RawOp::Balance)
        });
        commands.push(RawCommand {
            account: Some("ACC000001".into()),
            pin: Some("1234".into()),
            ..cmd(RawOp::Notifications)
        });

        let outcomes = run_all(&mut ledger, commands);
        let messages: Vec<_> = outcomes.iter().map(|o| o.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "User created successfully",
                "Logged in as alice",
                "Account created successfully for Alice. Account Number: ACC000001",
                "Loan LOAN000001 applied successfully",
                "EMI paid for loan LOAN000001",
                "Current Balance: 1000",
                "Account created successfully; Loan LOAN000001 applied successfully; \
                 EMI paid for loan LOAN000001",
            ]
        );
        assert!(outcomes.iter().all(|o| o.status == Status::Ok));
    }

    #[test]
    fn reports_missing_fields_and_ledger_errors() {
        let mut ledger = Ledger::default();
        let mut commands = login();
        commands.push(RawCommand {
            pin: Some("1234".into()),
            ..cmd(RawOp::Balance)
        });
        commands.push(RawCommand {
            account: Some("ACC000404".into()),
            pin: Some("1234".into()),
            ..cmd(RawOp::Balance)
        });
        commands.push(RawCommand::default());

        let outcomes = run_all(&mut ledger, commands);
        assert_eq!(outcomes[2].message, "missing field `account`");
        assert_eq!(outcomes[3].message, "account number does not exist");
        assert_eq!(outcomes[4].op, None);
        assert_eq!(outcomes[4].message, "missing field `op`");
        assert!(outcomes[2..].iter().all(|o| o.status == Status::Error));
    }

    #[tokio::test]
    async fn serve_hands_ledger_back() -> anyhow::Result<()> {
        let (tx_cmd, rx_cmd) = channel(8);
        let (tx_out, rx_out) = channel(8);

        let server = tokio::spawn(serve_commands(Ledger::default(), rx_cmd, tx_out));

        let mut commands = login();
        commands.push(open_account());
        for (i, c) in commands.into_iter().enumerate() {
            tx_cmd.send((i + 1, c)).await?;
        }
        drop(tx_cmd);

        let outcomes: Vec<Outcome> = ReceiverStream::new(rx_out).collect().await;
        let ledger = server.await??;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.iter().map(|o| o.row).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(ledger.get_balance("ACC000001", "1234"), Ok(dec!(1000)));
        assert!(ledger.validate_user("alice", "secret"));

        Ok(())
    }
}
