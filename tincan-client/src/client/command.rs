use tincan_core::RoomDescriptor;

/// Команды, поступающие в главный цикл клиента от вызывающего кода.
#[derive(Debug)]
pub enum ClientCommand {
    /// Войти в комнату и начать голосовой вызов.
    Join(RoomDescriptor),

    /// Покинуть комнату и разорвать соединение.
    Leave,
}
