use bank_ledger::csv::{RawCommand, RawOp};
use rand::{seq::SliceRandom, Rng};
use rust_decimal::Decimal;

const ACCOUNT_TYPES: [&str; 2] = ["savings", "current"];
const LOAN_TYPES: [&str; 3] = ["personal", "home", "vehicle"];
const FD_TERMS: [&str; 3] = ["6_months", "1_year", "2_years"];

fn account(n: u32) -> Option<String> {
    Some(format!("ACC{n:06}"))
}

fn pin(n: u32) -> Option<String> {
    Some(format!("{:04}", n % 10_000))
}

fn main() -> anyhow::Result<()> {
    let accounts = 100_000;
    let operations = 1_000_000;

    let b = csv::WriterBuilder::new();
    let mut wr = b.from_path("massive_script.csv")?;

    let mut rng = rand::thread_rng();

    wr.serialize(RawCommand {
        op: Some(RawOp::SignUp),
        user: Some("load".into()),
        password: Some("test".into()),
        ..Default::default()
    })?;
    wr.serialize(RawCommand {
        op: Some(RawOp::Login),
        user: Some("load".into()),
        password: Some("test".into()),
        ..Default::default()
    })?;

    for n in 1..=accounts {
        wr.serialize(RawCommand {
            op: Some(RawOp::OpenAccount),
            pin: pin(n),
            holder: Some(format!("Holder {n}")),
            age: Some(rng.gen_range(18..90)),
            address: Some(format!("{n} Generated St")),
            kind: ACCOUNT_TYPES.choose(&mut rng).map(|s| s.to_string()),
            amount: Some(Decimal::new(rng.gen_range(0..10_000_000), 2)),
            ..Default::default()
        })?;
    }

    let mut loans = 0;
    for _ in 0..operations {
        let n = rng.gen_range(1..=accounts);
        let cmd = match rng.gen_range(0..4) {
            0 => RawCommand {
                op: Some(RawOp::Balance),
                account: account(n),
                pin: pin(n),
                ..Default::default()
            },
            1 => RawCommand {
                op: Some(RawOp::FixedDeposit),
                account: account(n),
                pin: pin(n),
                kind: FD_TERMS.choose(&mut rng).map(|s| s.to_string()),
                amount: Some(Decimal::new(rng.gen_range(100..1_000_000), 2)),
                ..Default::default()
            },
            2 => {
                loans += 1;
                RawCommand {
                    op: Some(RawOp::Loan),
                    account: account(n),
                    pin: pin(n),
                    kind: LOAN_TYPES.choose(&mut rng).map(|s| s.to_string()),
                    amount: Some(Decimal::new(rng.gen_range(1_000..50_000_000), 2)),
                    months: Some(rng.gen_range(6..=360)),
                    ..Default::default()
                }
            }
            _ => RawCommand {
                op: Some(RawOp::PayEmi),
                account: account(n),
                pin: pin(n),
                loan: Some(format!("LOAN{:06}", rng.gen_range(1..=loans.max(1)))),
                ..Default::default()
            },
        };
        wr.serialize(cmd)?;
    }

    wr.flush()?;
    Ok(())
}
