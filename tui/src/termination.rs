use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub enum Interrupted {
    OsSigInt,
    UserInt,
}

#[derive(Debug, Clone)]
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    pub fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    pub fn terminate(&mut self, interrupted: Interrupted) -> anyhow::Result<()> {
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }
}

// crossterm's raw mode swallows Ctrl-C as a key event, so this only fires
// for interrupts delivered from outside the terminal
async fn terminate_by_interrupt_signal(mut terminator: Terminator) {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for the interrupt signal");

    terminator
        .terminate(Interrupted::OsSigInt)
        .expect("failed to send the interrupt notification");
}

// one broadcast channel carries the shutdown reason to every main loop
pub fn create_termination() -> (Terminator, broadcast::Receiver<Interrupted>) {
    let (tx, rx) = broadcast::channel(1);
    let terminator = Terminator::new(tx);

    tokio::spawn(terminate_by_interrupt_signal(terminator.clone()));

    (terminator, rx)
}
