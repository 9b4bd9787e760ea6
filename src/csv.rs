//! csv input/output format and functions
//!
//! Input is an operation script, one ledger operation per row:
//!
//! ```csv
//! op,account,pin,holder,age,address,kind,amount,months,joint,email,mobile,loan,user,password
//! sign_up,,,,,,,,,,,,,alice,secret
//! login,,,,,,,,,,,,,alice,secret
//! open_account,,1234,Alice,30,1 Main St,savings,1000,,,,,,,
//! ```
//!
//! Output is one outcome row per script row, and optionally a summary of every account.

use csv_async::{AsyncWriterBuilder, Terminator};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    account::Account,
    rates::RateTable,
    AccountNumber,
};

use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::mpsc::Sender,
};
use tokio_stream::{Stream, StreamExt};

/// Operations a script can run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum RawOp {
    SignUp,
    Login,
    Logout,
    OpenAccount,
    Balance,
    Notifications,
    FixedDeposit,
    Loan,
    PayEmi,
}

/// Single script row. Which columns are needed depends on `op`.
///
/// `kind` is the account type for `open_account`, the term for `fixed_deposit`
/// and the loan type for `loan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RawCommand {
    pub op: Option<RawOp>,
    pub account: Option<String>,
    pub pin: Option<String>,
    pub holder: Option<String>,
    pub age: Option<u32>,
    pub address: Option<String>,
    pub kind: Option<String>,
    pub amount: Option<Decimal>,
    pub months: Option<u32>,
    pub joint: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub loan: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Script row with its 1-based position among data rows
pub type ScriptRow = (usize, RawCommand);

/// take a reader and continuously deserialize script rows from it into `sender`
pub async fn deserialize_commands_from_csv_reader<'r, R: AsyncRead + Unpin + Send + 'r>(
    input: R,
    sender: Sender<ScriptRow>,
) -> anyhow::Result<()> {
    let mut builder = csv_async::AsyncReaderBuilder::new();
    builder.trim(csv_async::Trim::All);

    let mut rdr = builder.create_deserializer(input);

    let _headers = rdr.headers().await?;

    let mut records = rdr.deserialize::<RawCommand>();
    let mut row = 0;
    while let Some(record) = records.next().await {
        let record: RawCommand = record?;
        row += 1;
        sender.send((row, record)).await?;
    }

    Ok(())
}

/// Whether the operation was accepted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Status {
    Ok,
    Error,
}

/// Result of one script row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Outcome {
    pub row: usize,
    pub op: Option<RawOp>,
    pub status: Status,
    pub message: String,
}

/// read items from `in_stream` and save them as csv into `wr`. Headers will be included
/// automatically. Terminator is `\r\n`
pub async fn write_outcomes(
    in_stream: impl Stream<Item = Outcome> + Unpin,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut in_stream = in_stream;

    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    while let Some(outcome) = in_stream.next().await {
        wr.serialize(outcome).await?;
    }

    wr.flush().await?;
    Ok(())
}

/// summary of account state and products
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct AccountSummary {
    pub account: AccountNumber,
    holder: String,
    r#type: String,
    rate: Decimal,
    balance: Decimal,
    fixed_deposits: usize,
    loans: usize,
}

impl AccountSummary {
    /// Summarize `acc`, taking its interest rate from `rates`
    pub fn new(acc: &impl Account, rates: &RateTable) -> Self {
        let rp = 4; // round precision
        Self {
            account: acc.account_number().clone(),
            holder: acc.holder().to_owned(),
            r#type: acc.account_type().to_string(),
            rate: rates.account_rate(acc.account_type()),
            balance: acc.balance().round_dp(rp),
            fixed_deposits: acc.fixed_deposits().len(),
            loans: acc.loans().len(),
        }
    }
}

/// read items from `in_stream` and save them as [`AccountSummary`] into `wr`. Headers will be
/// included automatically. Terminator is `\r\n`
pub async fn summarize_accounts(
    in_stream: impl Stream<Item = AccountSummary> + Unpin,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut in_stream = in_stream;

    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    while let Some(summary) = in_stream.next().await {
        wr.serialize(summary).await?;
    }

    wr.flush().await?;
    Ok(())
}
