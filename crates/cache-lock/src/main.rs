fn main() -> anyhow::Result<()> {
    cache_lock::initialize_command_line()
}
