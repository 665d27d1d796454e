mod test_room_directory;
